//! Orchestrator / Engine Facade
//!
//! The public state machine tying synthesis, debouncing, and the sandbox
//! lifecycle together. One `PreviewEngine` owns one preview slot; all state
//! lives in the actor task and is observed through a watch channel.
//!
//! # Modules
//!
//! - `actor` - event loop owning all preview state
//! - `config` - per-slot tuning
//! - `debounce` - pure-timing request coalescing
//! - `messages` - facade-to-actor messages
//! - `state` - observable `PreviewState` snapshot

mod actor;
mod config;
mod debounce;
mod messages;
mod state;

pub use config::EngineConfig;
pub use messages::CompileInput;
pub use state::{Phase, PreviewState};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, watch};

use crate::doc::{LanguageTag, SourceFragment};
use crate::error::EngineError;
use crate::sandbox::SandboxHost;

use actor::EngineActor;
use messages::EngineMsg;

/// Public handle to one preview slot.
///
/// All operations are non-blocking message sends; calling any of them after
/// `dispose()` is a reported error, never a panic.
pub struct PreviewEngine {
    tx: mpsc::UnboundedSender<EngineMsg>,
    state_rx: watch::Receiver<PreviewState>,
    disposed: AtomicBool,
}

impl PreviewEngine {
    /// Spawn the engine actor for a preview slot.
    ///
    /// Must be called from within a tokio runtime; the actor task exits on
    /// `dispose()` or when the engine handle is dropped.
    pub fn spawn(host: Arc<dyn SandboxHost>, config: EngineConfig) -> Self {
        let (tx, state_rx) = EngineActor::spawn(host, &config);
        Self {
            tx,
            state_rx,
            disposed: AtomicBool::new(false),
        }
    }

    /// Stage input for debounced compilation.
    pub fn compile(&self, input: CompileInput) -> Result<(), EngineError> {
        self.send(EngineMsg::Compile(input))
    }

    /// Convenience for the editor's `(sourceText, languageTag)` change events.
    pub fn compile_fragment(
        &self,
        text: impl Into<String>,
        lang: LanguageTag,
    ) -> Result<(), EngineError> {
        self.compile(CompileInput::Fragment(SourceFragment::new(text, lang)))
    }

    /// Gate compilation on visibility. Hiding cancels the pending trigger
    /// but keeps the sandbox mounted; showing re-triggers any staged input.
    pub fn set_visible(&self, visible: bool) -> Result<(), EngineError> {
        self.send(EngineMsg::SetVisible(visible))
    }

    /// Force recompilation of the staged input without new edits.
    pub fn refresh(&self) -> Result<(), EngineError> {
        self.send(EngineMsg::Refresh)
    }

    /// Tear down the slot: cancel timers, reclaim sandbox resources,
    /// publish the terminal state. Further calls return
    /// `EngineError::Disposed`.
    pub fn dispose(&self) -> Result<(), EngineError> {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return Err(EngineError::Disposed);
        }
        self.tx
            .send(EngineMsg::Dispose)
            .map_err(|_| EngineError::Closed)
    }

    /// Subscribe to state snapshots.
    pub fn state(&self) -> watch::Receiver<PreviewState> {
        self.state_rx.clone()
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> PreviewState {
        self.state_rx.borrow().clone()
    }

    fn send(&self, msg: EngineMsg) -> Result<(), EngineError> {
        if self.disposed.load(Ordering::SeqCst) {
            crate::debug!("engine"; "call after dispose (reported, ignored)");
            return Err(EngineError::Disposed);
        }
        self.tx.send(msg).map_err(|_| EngineError::Closed)
    }
}

impl Drop for PreviewEngine {
    fn drop(&mut self) {
        // Actor dispose is idempotent; a second message is harmless
        let _ = self.tx.send(EngineMsg::Dispose);
    }
}
