//! Composite Assembler
//!
//! Merges a project's canonical entry fragments (markup + style + script)
//! into one document for whole-project preview. When no markup entry
//! exists, a generic placeholder shell identifying the project by name is
//! synthesized instead. The style entry is injected into the shell's style
//! region and the script entry at end-of-body, in that fixed order: scripts
//! that query computed layout during initialization must observe final
//! styles.

use crate::doc::CompiledDocument;
use crate::project::ProjectEntries;
use crate::synth::shell;

/// Assemble the canonical entries into one renderable document.
pub fn assemble(project_name: &str, entries: &ProjectEntries<'_>) -> CompiledDocument {
    let placeholder;
    let body = match entries.markup {
        Some(markup) => markup.content.as_str(),
        None => {
            placeholder = placeholder_body(project_name);
            placeholder.as_str()
        }
    };

    let style = entries.style.map(|f| f.content.as_str());
    let script = entries.script.map(|f| f.content.as_str());

    CompiledDocument::new(shell::document(project_name, style, body, script))
}

/// Generic shell body shown when the project has no markup entry.
fn placeholder_body(project_name: &str) -> String {
    format!(
        "<div class=\"placeholder\">\n\
         <h1>{}</h1>\n\
         <p>No markup entry found. Add an <code>index.html</code> to this project.</p>\n\
         </div>",
        shell::escape(project_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::LanguageTag;
    use crate::project::{ProjectFileView, resolve_entries};
    use std::path::{Path, PathBuf};

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
    fn test_markup_and_style_without_script() {
        let files = vec![
            file("index.html", "<main>content</main>"),
            file("style.css", "main { color: teal; }"),
        ];
        let doc = assemble("demo", &resolve_entries(&files));
        assert!(doc.html.contains("<main>content</main>"));
        assert!(doc.html.contains("main { color: teal; }"));
        // Script region is absent entirely
        assert!(!doc.html.contains("<script>"));
    }

    #[test]
    fn test_style_injected_before_script() {
        let files = vec![
            file("index.html", "<p>x</p>"),
            file("style.css", "P_STYLE_MARK"),
            file("script.js", "S_SCRIPT_MARK"),
        ];
        let doc = assemble("demo", &resolve_entries(&files));
        let style_pos = doc.html.find("P_STYLE_MARK").unwrap();
        let script_pos = doc.html.find("S_SCRIPT_MARK").unwrap();
        assert!(style_pos < script_pos);
    }

    #[test]
    fn test_placeholder_identifies_project() {
        let files = vec![file("style.css", "p{}")];
        let doc = assemble("my <cool> project", &resolve_entries(&files));
        assert!(doc.html.contains("my &lt;cool&gt; project"));
        assert!(doc.html.contains("class=\"placeholder\""));
    }

    #[test]
    fn test_empty_project_still_complete_document() {
        let doc = assemble("empty", &ProjectEntries::default());
        assert!(doc.html.starts_with("<!DOCTYPE html>"));
        assert!(doc.html.contains("<h1>empty</h1>"));
    }
}
