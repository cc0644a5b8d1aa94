//! Stylesheet dialect synthesizer.
//!
//! The input is embedded verbatim in a style block. The shell carries a
//! small fixed demonstration body (heading, paragraph, button, labeled box)
//! so the visual effect of the stylesheet is observable without
//! accompanying markup.

use super::shell;

/// Fixed demonstration body exercised by the user's stylesheet.
const DEMO_BODY: &str = "\
<h1>Heading</h1>\n\
<p>The quick brown fox jumps over the lazy dog.</p>\n\
<button>Button</button>\n\
<div class=\"box\" style=\"margin-top:12px;padding:12px;border:1px solid #ccc\">\n\
  <span class=\"box-label\">Box</span>\n\
  <p>Styled content area.</p>\n\
</div>";

pub(super) fn synthesize(text: &str) -> String {
    shell::document("Style Preview", Some(text), DEMO_BODY, None)
}
