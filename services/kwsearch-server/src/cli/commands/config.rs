//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also show resolved XDG paths
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathsInfo>,
    pub config: &'a Config,
}

#[derive(Debug, Serialize)]
pub struct PathsInfo {
    pub config_file: String,
    pub data_dir: String,
}

/// Execute the config command
pub fn execute(
    args: ConfigArgs,
    config: &Config,
    xdg: &XdgDirs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let paths = args.all.then(|| PathsInfo {
        config_file: xdg.config_file().display().to_string(),
        data_dir: xdg.data_dir.display().to_string(),
    });

    match format {
        OutputFormat::Human => {
            if let Some(paths) = &paths {
                println!("# config file: {}", paths.config_file);
                println!("# data dir:    {}", paths.data_dir);
            }
            print!("{}", toml::to_string_pretty(config)?);
        }
        OutputFormat::Json => {
            let response = ConfigResponse { paths, config };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
