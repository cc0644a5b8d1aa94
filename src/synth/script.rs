//! Script dialect synthesizer.
//!
//! The input is embedded verbatim inside a guarded execution block. A
//! thrown error is rendered as visible text inside the document's fault
//! region rather than silently lost. These runtime faults are the
//! untrusted content's own failures and stay inside the sandbox; they do
//! not surface on the engine's error channel.

use super::shell;

/// Body the script runs against: an output root plus the shell fault region.
const SCRIPT_BODY: &str = r#"<div id="app"></div>"#;

/// Wrap user code so any synchronous throw lands in the fault region.
pub(super) fn guard(code: &str) -> String {
    format!(
        "try {{\n{code}\n}} catch (err) {{\n\
         \x20 var el = document.getElementById('__fault');\n\
         \x20 el.style.display = 'block';\n\
         \x20 el.textContent = 'Error: ' + (err && err.message ? err.message : String(err));\n\
         }}"
    )
}

pub(super) fn synthesize(text: &str) -> String {
    shell::document("Script Preview", None, SCRIPT_BODY, Some(&guard(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_is_guarded() {
        let html = synthesize("console.log('x')");
        assert!(html.contains("try {"));
        assert!(html.contains("console.log('x')"));
        assert!(html.contains("} catch (err) {"));
        assert!(html.contains("__fault"));
    }

    #[test]
    fn test_throwing_script_renders_error_text() {
        // The guard routes the message into the visible fault region
        let html = synthesize("throw new Error('boom')");
        assert!(html.contains("throw new Error('boom')"));
        assert!(html.contains("el.textContent = 'Error: '"));
    }

    #[test]
    fn test_app_root_present() {
        assert!(synthesize("1+1").contains(r#"<div id="app"></div>"#));
    }
}
