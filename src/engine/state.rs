//! Preview state snapshot.
//!
//! Owned exclusively by the engine actor and published over a watch
//! channel; all other components receive inputs and return outputs without
//! holding this state. Serializable so UI bridges can forward it as JSON.

use serde::{Deserialize, Serialize};

use crate::doc::CompiledDocument;

/// Lifecycle phase derived from the snapshot fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Compiling,
    Ready,
    Errored,
    Disposed,
}

/// Observable snapshot of one preview slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewState {
    /// A compile is staged or running
    pub is_compiling: bool,
    /// Human-readable pipeline failure (synthesis or sandbox); runtime
    /// faults of untrusted code render inside the sandbox and never land here
    pub error: Option<String>,
    /// Last successfully compiled document; kept through later errors so
    /// the UI never blanks a previously good rendering
    pub document: Option<CompiledDocument>,
    /// Hidden previews stage input but attempt no compilation
    pub is_visible: bool,
    /// Terminal flag set by `dispose()`
    pub disposed: bool,
}

impl PreviewState {
    pub(crate) fn initial() -> Self {
        Self {
            is_compiling: false,
            error: None,
            document: None,
            is_visible: true,
            disposed: false,
        }
    }

    /// Derived lifecycle phase: `Idle → Compiling → {Ready | Errored}`,
    /// with `Disposed` terminal.
    pub fn phase(&self) -> Phase {
        if self.disposed {
            Phase::Disposed
        } else if self.is_compiling {
            Phase::Compiling
        } else if self.error.is_some() {
            Phase::Errored
        } else if self.document.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// JSON form for UI bridges.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
