//! Light text-markup dialect synthesizer.
//!
//! A best-effort, non-recursive, single-pass line rewrite: recognized
//! leading tokens (`#`, `##`, `###`) become headings, `**bold**` becomes
//! `<strong>`, `*italic*` becomes `<em>`, and line breaks are preserved.
//! This is deliberately not a full grammar - nested constructs are not
//! parsed, and unrecognized text passes through escaped.

use regex::Regex;
use std::sync::LazyLock;

use super::shell;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

pub(super) fn synthesize(text: &str) -> String {
    let mut body = String::with_capacity(text.len() + 64);

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("### ") {
            body.push_str("<h3>");
            body.push_str(&inline(rest));
            body.push_str("</h3>\n");
        } else if let Some(rest) = line.strip_prefix("## ") {
            body.push_str("<h2>");
            body.push_str(&inline(rest));
            body.push_str("</h2>\n");
        } else if let Some(rest) = line.strip_prefix("# ") {
            body.push_str("<h1>");
            body.push_str(&inline(rest));
            body.push_str("</h1>\n");
        } else if line.trim().is_empty() {
            body.push_str("<br>\n");
        } else {
            body.push_str(&inline(line));
            body.push_str("<br>\n");
        }
    }

    shell::document("Document Preview", None, &body, None)
}

/// Escape a line, then rewrite inline spans. Bold runs before italic so the
/// double-star form is consumed first; neither rewrite recurses.
fn inline(line: &str) -> String {
    let escaped = shell::escape(line);
    let bolded = BOLD.replace_all(&escaped, "<strong>$1</strong>");
    ITALIC.replace_all(&bolded, "<em>$1</em>").into_owned()
}
