//! Result formatting: excerpts and HTML rendering.

use crate::core::types::{RankedRow, SearchHit, SearchOutcome};
use std::fmt::Write;

/// First `max_chars` characters of `content`.
///
/// Counts Unicode scalar values, so the cut never splits a character.
pub fn excerpt(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((offset, _)) => &content[..offset],
        None => content,
    }
}

/// Turn a ranked row into a display record
pub fn format_hit(row: RankedRow, excerpt_chars: usize) -> SearchHit {
    let text = excerpt(&row.content, excerpt_chars).to_string();
    SearchHit {
        document_id: row.document_id,
        title: row.title,
        url: row.url,
        excerpt: text,
        score: row.score,
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a search outcome as an HTML fragment.
///
/// Every piece of stored or user-supplied text passes through
/// [`escape_html`].
pub fn render_html(query: &str, outcome: &SearchOutcome) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<section class=\"results\" data-query=\"{}\">",
        escape_html(query)
    );

    match outcome {
        SearchOutcome::EmptyQuery => {
            html.push_str("<p class=\"empty\">Enter one or more keywords to search.</p>\n");
        }
        SearchOutcome::NoMatch => {
            let _ = writeln!(
                html,
                "<p class=\"empty\">0 results for <q>{}</q></p>",
                escape_html(query)
            );
        }
        SearchOutcome::Hits(hits) => {
            let _ = writeln!(
                html,
                "<p class=\"count\">{} result{}</p>",
                hits.len(),
                if hits.len() == 1 { "" } else { "s" }
            );
            html.push_str("<ol>\n");
            for hit in hits {
                let url = escape_html(&hit.url);
                let _ = writeln!(
                    html,
                    "<li><a href=\"{url}\">{}</a> <cite>{url}</cite><p>{}</p></li>",
                    escape_html(&hit.title),
                    escape_html(&hit.excerpt),
                );
            }
            html.push_str("</ol>\n");
        }
    }

    html.push_str("</section>\n");
    html
}
