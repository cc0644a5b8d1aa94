//! Component / unknown-dialect fallback synthesizer.
//!
//! Fragments tagged as components (and any tag with no dedicated
//! synthesizer) are mounted inside a small component runtime shell. A
//! fragment that does not declare an exported entry is wrapped as a
//! fallback component rendering the raw source as preformatted content,
//! so the sandbox always has a mountable entry point. Evaluation and
//! mount failures are caught inside the sandbox and rendered as inline
//! error text, mirroring the script dialect's guard.

use regex::Regex;
use std::sync::LazyLock;

use super::{script, shell};

/// Best-effort exported-entry detection. Only the default-export form is
/// rewritten; anything else falls back to the preformatted-source component.
static EXPORT_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*export\s+default\s+").unwrap());

/// In-document component runtime: resolves an entry to renderable output.
const RUNTIME: &str = "\
function __mount(entry) {\n\
  var root = document.getElementById('app');\n\
  var out = typeof entry === 'function' ? entry() : entry;\n\
  if (out instanceof Node) { root.appendChild(out); }\n\
  else if (out != null) { root.innerHTML = String(out); }\n\
}";

const COMPONENT_BODY: &str = r#"<div id="app"></div>"#;

pub(super) fn synthesize(text: &str) -> String {
    let program = if EXPORT_DEFAULT.is_match(text) {
        EXPORT_DEFAULT.replace(text, "var __entry = ").into_owned()
    } else {
        format!(
            "var __entry = function () {{ return {}; }};",
            js_string(&fallback_markup(text))
        )
    };

    let script = format!(
        "{RUNTIME}\n{}",
        script::guard(&format!("{program}\n__mount(__entry);"))
    );

    shell::document("Component Preview", None, COMPONENT_BODY, Some(&script))
}

/// Fallback component output: the raw source, escaped, as preformatted text.
fn fallback_markup(text: &str) -> String {
    format!("<pre class=\"source\">{}</pre>", shell::escape(text))
}

/// Encode text as a JavaScript string literal.
fn js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_export_becomes_entry() {
        let html = synthesize("export default function App() { return 'hi'; }");
        assert!(html.contains("var __entry = function App()"));
        assert!(html.contains("__mount(__entry);"));
    }

    #[test]
    fn test_no_export_falls_back_to_preformatted_source() {
        let html = synthesize("const x = 1;");
        assert!(html.contains("var __entry = function ()"));
        assert!(html.contains("<pre class=\\\"source\\\">const x = 1;</pre>"));
    }

    #[test]
    fn test_mount_is_guarded() {
        let html = synthesize("export default broken(");
        assert!(html.contains("try {"));
        assert!(html.contains("__fault"));
    }

    #[test]
    fn test_js_string_escaping() {
        assert_eq!(js_string("a\"b\\c\nd"), "\"a\\\"b\\\\c\\nd\"");
    }

    #[test]
    fn test_runtime_present() {
        assert!(synthesize("x").contains("function __mount(entry)"));
    }
}
