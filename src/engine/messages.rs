//! Engine actor messages.

use crate::doc::SourceFragment;
use crate::project::ProjectFileView;

/// What to compile: a single editor fragment, or a whole-project snapshot
/// read from the external file store at compile time.
#[derive(Debug, Clone)]
pub enum CompileInput {
    Fragment(SourceFragment),
    Project {
        name: String,
        files: Vec<ProjectFileView>,
    },
}

impl CompileInput {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Fragment(_) => "fragment",
            Self::Project { .. } => "project",
        }
    }
}

/// Messages from the facade to the engine actor.
#[derive(Debug)]
pub(crate) enum EngineMsg {
    /// Stage input for debounced compilation
    Compile(CompileInput),
    /// Toggle visibility gating
    SetVisible(bool),
    /// Force recompilation of the staged input without new edits
    Refresh,
    /// Terminal teardown
    Dispose,
}
