//! Renderer module: documentation model to Markdown pages.

pub mod markdown;

pub use markdown::{class_page, index_page};

use regex::Regex;
use std::sync::LazyLock;

static RE_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\n\s*").unwrap());

/// Two-column Markdown table with the fixed separator row.
pub fn table(head: [&str; 2], rows: &[[String; 2]]) -> String {
    let mut txt = format!("| {} | {} |\n", head[0], head[1]);
    txt.push_str("|-----------|-----------|\n");
    for [left, right] in rows {
        txt.push_str(&format!("| {} | {} |\n", cell(left), cell(right)));
    }
    txt
}

/// A table cell stays on one line and never closes its column early.
fn cell(text: &str) -> String {
    RE_LINE_BREAK.replace_all(text, " ").replace('|', "\\|")
}

/// Escape `<` and `>` for Markdown text (include paths, template lines,
/// table cells).
pub fn escape_angle_brackets(text: &str) -> String {
    text.replace('<', "\\<").replace('>', "\\>")
}

/// Entity-escape text placed inside raw HTML such as `<h3>` headings.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
