//! Project read model and entry resolution.
//!
//! The engine reads snapshots of `ProjectFileView` records owned by the
//! external project/file store; it never mutates them. Entry resolution is
//! a pure, name-convention based selection: exact filename matches first,
//! then extension matches, first match wins, ties broken by earliest
//! position in the given file ordering.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::doc::LanguageTag;

/// Read-only view of one file in the active project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFileView {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    pub content: String,
    pub lang: LanguageTag,
    /// Epoch milliseconds, as reported by the file store
    pub last_modified: u64,
}

impl ProjectFileView {
    fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }
}

/// Canonical entry fragments for whole-project preview.
///
/// All-`None` means "use the default shell" - it is not an error.
#[derive(Debug, Default)]
pub struct ProjectEntries<'a> {
    pub markup: Option<&'a ProjectFileView>,
    pub style: Option<&'a ProjectFileView>,
    pub script: Option<&'a ProjectFileView>,
}

// Fixed priority lists per entry role. Exact names win over extensions.
const MARKUP_NAMES: &[&str] = &["index.html", "main.html", "app.html", "index.htm"];
const MARKUP_EXTS: &[&str] = &["html", "htm"];
const STYLE_NAMES: &[&str] = &["style.css", "styles.css", "main.css", "index.css"];
const STYLE_EXTS: &[&str] = &["css"];
const SCRIPT_NAMES: &[&str] = &["script.js", "main.js", "index.js", "app.js"];
const SCRIPT_EXTS: &[&str] = &["js", "mjs"];

/// Pick canonical entry fragments (markup/style/script) by name convention.
pub fn resolve_entries(files: &[ProjectFileView]) -> ProjectEntries<'_> {
    ProjectEntries {
        markup: pick(files, MARKUP_NAMES, MARKUP_EXTS),
        style: pick(files, STYLE_NAMES, STYLE_EXTS),
        script: pick(files, SCRIPT_NAMES, SCRIPT_EXTS),
    }
}

fn pick<'a>(
    files: &'a [ProjectFileView],
    names: &[&str],
    exts: &[&str],
) -> Option<&'a ProjectFileView> {
    for name in names {
        if let Some(file) = files.iter().find(|f| f.name.eq_ignore_ascii_case(name)) {
            return Some(file);
        }
    }
    files.iter().find(|f| {
        f.extension()
            .is_some_and(|ext| exts.contains(&ext.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content: &str) -> ProjectFileView {
        ProjectFileView {
            id: name.to_string(),
            name: name.to_string(),
            path: PathBuf::from(name),
            content: content.to_string(),
            lang: LanguageTag::from_path(Path::new(name)),
            last_modified: 0,
        }
    }

    #[test]
    fn test_exact_name_beats_extension_match() {
        let files = vec![file("other.html", "a"), file("index.html", "b")];
        let entries = resolve_entries(&files);
        assert_eq!(entries.markup.unwrap().name, "index.html");
    }

    #[test]
    fn test_extension_fallback_earliest_wins() {
        let files = vec![file("first.css", "a"), file("second.css", "b")];
        let entries = resolve_entries(&files);
        assert_eq!(entries.style.unwrap().name, "first.css");
    }

    #[test]
    fn test_name_priority_order() {
        // style.css outranks main.css regardless of declaration order
        let files = vec![file("main.css", "a"), file("style.css", "b")];
        let entries = resolve_entries(&files);
        assert_eq!(entries.style.unwrap().name, "style.css");
    }

    #[test]
    fn test_all_roles_resolved() {
        let files = vec![
            file("index.html", "<p>hi</p>"),
            file("style.css", "p{}"),
            file("script.js", "1"),
            file("notes.md", "# n"),
        ];
        let entries = resolve_entries(&files);
        assert_eq!(entries.markup.unwrap().name, "index.html");
        assert_eq!(entries.style.unwrap().name, "style.css");
        assert_eq!(entries.script.unwrap().name, "script.js");
    }

    #[test]
    fn test_no_matches_is_all_none_not_error() {
        let files = vec![file("notes.md", "# n"), file("data.json", "{}")];
        let entries = resolve_entries(&files);
        assert!(entries.markup.is_none());
        assert!(entries.style.is_none());
        assert!(entries.script.is_none());
    }

    #[test]
    fn test_case_insensitive_names() {
        let files = vec![file("Index.HTML", "x")];
        assert!(resolve_entries(&files).markup.is_some());
    }
}
