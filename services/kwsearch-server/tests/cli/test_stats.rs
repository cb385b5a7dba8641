//! Tests for the stats command

use crate::common::{memory_services, unavailable_services, IndexBuilder};
use kwsearch::cli::commands::stats::{execute, StatsArgs};
use kwsearch::cli::OutputFormat;

#[tokio::test]
async fn test_stats_memory_backend() {
    let services = memory_services(IndexBuilder::many_matches(5));
    execute(StatsArgs {}, &services, OutputFormat::Json)
        .await
        .expect("Stats failed");
}

#[tokio::test]
async fn test_stats_unavailable() {
    let (services, _temp) = unavailable_services();
    assert!(execute(StatsArgs {}, &services, OutputFormat::Human)
        .await
        .is_err());
}
