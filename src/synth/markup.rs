//! Markup dialect synthesizer.
//!
//! The input is treated as a body payload and wrapped in the minimal shell
//! with baseline readability styling. No sanitization is performed - the
//! sandbox boundary, not the synthesizer, owns safety.

use super::shell;

pub(super) fn synthesize(text: &str) -> String {
    shell::document("Preview", None, text, None)
}
