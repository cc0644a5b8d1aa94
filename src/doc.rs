//! Core preview types: source fragments, language tags, compiled documents.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source-language family, determines which synthesizer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageTag {
    /// Structured markup (.html) - wrapped as a body payload
    Markup,
    /// Stylesheet (.css) - embedded with a demonstration body
    Stylesheet,
    /// Script (.js) - embedded inside a guarded execution block
    Script,
    /// Simplified text-markup document (.md) - single-pass line rewrite
    LightMarkupDoc,
    /// Component-style dialect (.jsx and friends) - component runtime shell
    Component,
    /// Unrecognized - routed to the component fallback arm
    Unknown,
}

impl LanguageTag {
    /// Detect language tag from a file extension.
    ///
    /// This is the engine's own fixed dialect-selection table; the external
    /// file store performs its own extension inference for project files.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "html" | "htm" => Self::Markup,
            "css" => Self::Stylesheet,
            "js" | "mjs" => Self::Script,
            "md" | "markdown" => Self::LightMarkupDoc,
            "jsx" | "tsx" | "vue" | "svelte" => Self::Component,
            _ => Self::Unknown,
        }
    }

    /// Detect language tag from a file path.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Display name for this dialect.
    pub fn name(self) -> &'static str {
        match self {
            Self::Markup => "markup",
            Self::Stylesheet => "stylesheet",
            Self::Script => "script",
            Self::LightMarkupDoc => "lightdoc",
            Self::Component => "component",
            Self::Unknown => "unknown",
        }
    }
}

/// A single in-progress source text plus its language classification,
/// supplied by the editor per compile request. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFragment {
    pub text: String,
    pub lang: LanguageTag,
}

impl SourceFragment {
    pub fn new(text: impl Into<String>, lang: LanguageTag) -> Self {
        Self {
            text: text.into(),
            lang,
        }
    }

    /// Whitespace-only fragments yield "nothing to render", not an error.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A complete, self-contained renderable document.
///
/// Always parseable as a full document (structural root, inline style block
/// if applicable, inline script block if applicable), even when the input
/// was a fragment. Never contains unresolved template placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledDocument {
    pub html: String,
}

impl CompiledDocument {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_from_extension() {
        assert_eq!(LanguageTag::from_extension("html"), LanguageTag::Markup);
        assert_eq!(LanguageTag::from_extension("HTM"), LanguageTag::Markup);
        assert_eq!(LanguageTag::from_extension("css"), LanguageTag::Stylesheet);
        assert_eq!(LanguageTag::from_extension("js"), LanguageTag::Script);
        assert_eq!(
            LanguageTag::from_extension("md"),
            LanguageTag::LightMarkupDoc
        );
        assert_eq!(LanguageTag::from_extension("jsx"), LanguageTag::Component);
        assert_eq!(LanguageTag::from_extension("wat"), LanguageTag::Unknown);
    }

    #[test]
    fn test_tag_from_path() {
        assert_eq!(
            LanguageTag::from_path(Path::new("src/index.html")),
            LanguageTag::Markup
        );
        assert_eq!(
            LanguageTag::from_path(Path::new("no_extension")),
            LanguageTag::Unknown
        );
    }

    #[test]
    fn test_blank_fragment() {
        assert!(SourceFragment::new("  \n\t ", LanguageTag::Markup).is_blank());
        assert!(!SourceFragment::new("<p>x</p>", LanguageTag::Markup).is_blank());
    }
}
