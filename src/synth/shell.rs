//! Shared document shell for all dialect synthesizers.
//!
//! Every synthesizer emits the same minimal structure (charset, title,
//! baseline readability style, body, optional user style block, optional
//! end-of-body script) so all compiled documents are structurally identical
//! and always parseable as complete documents. The style region precedes
//! the script region: scripts that query computed layout during
//! initialization depend on styles being present first.

use std::borrow::Cow;

/// Baseline readability styling (sane default margins/padding/font stack).
pub(crate) const BASELINE_STYLE: &str = "\
  * { box-sizing: border-box; }\n\
  body {\n\
    margin: 16px;\n\
    padding: 0;\n\
    font-family: -apple-system, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;\n\
    line-height: 1.5;\n\
    color: #1a1a1a;\n\
  }\n\
  pre { white-space: pre-wrap; word-break: break-word; }\n";

/// Hidden error region every shell carries. Guards inside the document make
/// it visible and fill it when untrusted code throws at rendering time.
pub(crate) const FAULT_REGION: &str =
    r#"<pre id="__fault" style="display:none;color:#b00020;border:1px solid #b00020;padding:8px"></pre>"#;

/// Build a complete document from the shell regions.
///
/// `style` and `script` are embedded verbatim (the sandbox boundary, not
/// this function, owns safety); `body` is trusted synthesizer output.
pub(crate) fn document(
    title: &str,
    style: Option<&str>,
    body: &str,
    script: Option<&str>,
) -> String {
    let mut html = String::with_capacity(
        512 + body.len() + style.map_or(0, str::len) + script.map_or(0, str::len),
    );
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str("<style>\n");
    html.push_str(BASELINE_STYLE);
    html.push_str("</style>\n");
    if let Some(style) = style {
        html.push_str("<style>\n");
        html.push_str(&close_raw_text(style, "</style"));
        html.push_str("\n</style>\n");
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push('\n');
    html.push_str(FAULT_REGION);
    html.push('\n');
    if let Some(script) = script {
        html.push_str("<script>\n");
        html.push_str(&close_raw_text(script, "</script"));
        html.push_str("\n</script>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Prevent user text from terminating its raw-text element early
/// (`</style>` inside a stylesheet, `</script>` inside a script).
fn close_raw_text<'a>(text: &'a str, closer: &str) -> Cow<'a, str> {
    if !text.to_ascii_lowercase().contains(closer) {
        return Cow::Borrowed(text);
    }
    let escaped_closer = closer.replace('/', "\\/");
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.to_ascii_lowercase().find(closer) {
        result.push_str(&rest[..pos]);
        result.push_str(&escaped_closer);
        rest = &rest[pos + closer.len()..];
    }
    result.push_str(rest);
    Cow::Owned(result)
}

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub(crate) fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}
