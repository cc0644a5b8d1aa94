//! Dialect Synthesizers
//!
//! One pure function per supported language family, each producing a
//! self-contained renderable document string from one fragment of source.
//! Dispatch goes through a fixed lookup table keyed by `LanguageTag`;
//! adding a dialect is one table entry plus one pure function. Tags with
//! no dedicated synthesizer fall through to the component arm.
//!
//! Synthesizers never fail on malformed input - they degrade to a
//! best-effort document. A panic inside a synthesizer is caught at the
//! dispatch boundary and converted to `SynthError`, so nothing here ever
//! crashes the caller.

mod component;
mod lightdoc;
mod markup;
mod script;
pub(crate) mod shell;
mod stylesheet;

use std::panic::{self, AssertUnwindSafe};

use crate::doc::{CompiledDocument, LanguageTag, SourceFragment};
use crate::error::SynthError;

/// A dialect synthesizer: raw fragment text in, full document out.
type SynthFn = fn(&str) -> String;

/// Fixed dispatch table. `Unknown` is intentionally absent - it routes to
/// the component fallback arm.
const SYNTHESIZERS: &[(LanguageTag, SynthFn)] = &[
    (LanguageTag::Markup, markup::synthesize),
    (LanguageTag::Stylesheet, stylesheet::synthesize),
    (LanguageTag::Script, script::synthesize),
    (LanguageTag::LightMarkupDoc, lightdoc::synthesize),
    (LanguageTag::Component, component::synthesize),
];

fn synth_fn(lang: LanguageTag) -> SynthFn {
    SYNTHESIZERS
        .iter()
        .find(|(tag, _)| *tag == lang)
        .map_or(component::synthesize as SynthFn, |(_, f)| *f)
}

/// Synthesize a renderable document from a single fragment.
///
/// Returns `Ok(None)` for empty or whitespace-only input - "nothing to
/// render", which callers must treat as distinct from an error.
pub fn synthesize(fragment: &SourceFragment) -> Result<Option<CompiledDocument>, SynthError> {
    if fragment.is_blank() {
        return Ok(None);
    }

    let f = synth_fn(fragment.lang);
    match panic::catch_unwind(AssertUnwindSafe(|| f(&fragment.text))) {
        Ok(html) => Ok(Some(CompiledDocument::new(html))),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            crate::log!("synth"; "{} synthesizer failed: {}", fragment.lang.name(), message);
            Err(SynthError::Panicked(message))
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown synthesizer failure".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TAGS: &[LanguageTag] = &[
        LanguageTag::Markup,
        LanguageTag::Stylesheet,
        LanguageTag::Script,
        LanguageTag::LightMarkupDoc,
        LanguageTag::Component,
        LanguageTag::Unknown,
    ];

    #[test]
    fn test_empty_input_yields_null_document_for_all_tags() {
        for &tag in ALL_TAGS {
            let result = synthesize(&SourceFragment::new("", tag));
            assert!(matches!(result, Ok(None)), "tag {:?}", tag);
            let result = synthesize(&SourceFragment::new("  \n ", tag));
            assert!(matches!(result, Ok(None)), "tag {:?}", tag);
        }
    }

    #[test]
    fn test_every_tag_produces_complete_document() {
        for &tag in ALL_TAGS {
            let doc = synthesize(&SourceFragment::new("content", tag))
                .unwrap()
                .unwrap();
            assert!(doc.html.starts_with("<!DOCTYPE html>"), "tag {:?}", tag);
            assert!(doc.html.contains("<body>"), "tag {:?}", tag);
        }
    }

    #[test]
    fn test_unknown_routes_to_component_fallback() {
        let doc = synthesize(&SourceFragment::new("mystery", LanguageTag::Unknown))
            .unwrap()
            .unwrap();
        assert!(doc.html.contains("function __mount(entry)"));
    }

    #[test]
    fn test_markup_scenario() {
        let doc = synthesize(&SourceFragment::new("<h1>Hi</h1>", LanguageTag::Markup))
            .unwrap()
            .unwrap();
        assert!(doc.html.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn test_throwing_script_scenario() {
        let doc = synthesize(&SourceFragment::new(
            "throw new Error('boom')",
            LanguageTag::Script,
        ))
        .unwrap()
        .unwrap();
        assert!(doc.html.contains("boom"));
        assert!(doc.html.contains("} catch (err) {"));
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("bad");
        assert_eq!(panic_message(payload.as_ref()), "bad");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("worse"));
        assert_eq!(panic_message(payload.as_ref()), "worse");
        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown synthesizer failure");
    }
}
