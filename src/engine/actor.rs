//! Engine actor: single owner of preview state.
//!
//! Event loop in two arms: incoming facade messages, and the debouncer's
//! precise sleep. All compilation work is synchronous string
//! transformation; the sandbox load handshake runs on tasks spawned by the
//! lifecycle manager.
//!
//! ```text
//! EngineMsg ──┐
//!             ├── select! ── debounce fire ── synthesize/assemble ── SandboxManager
//! timer ──────┘                                        │
//!                                      watch::Sender<PreviewState>
//! ```

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use super::config::EngineConfig;
use super::debounce::Debouncer;
use super::messages::{CompileInput, EngineMsg};
use super::state::PreviewState;
use crate::doc::CompiledDocument;
use crate::error::SandboxError;
use crate::project::resolve_entries;
use crate::sandbox::{SandboxHost, SandboxManager};
use crate::{assemble, debug, log, synth};

pub(crate) struct EngineActor {
    rx: mpsc::UnboundedReceiver<EngineMsg>,
    state_tx: watch::Sender<PreviewState>,
    debouncer: Debouncer,
    host: Arc<dyn SandboxHost>,
    /// Mounted lazily on the first successful compile
    sandbox: Option<SandboxManager>,
    state: PreviewState,
}

impl EngineActor {
    /// Spawn the actor task. Must be called from within a tokio runtime.
    pub fn spawn(
        host: Arc<dyn SandboxHost>,
        config: &EngineConfig,
    ) -> (
        mpsc::UnboundedSender<EngineMsg>,
        watch::Receiver<PreviewState>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(PreviewState::initial());

        let actor = Self {
            rx,
            state_tx,
            debouncer: Debouncer::new(config.quiescence),
            host,
            sandbox: None,
            state: PreviewState::initial(),
        };
        tokio::spawn(actor.run());

        (tx, state_rx)
    }

    async fn run(mut self) {
        loop {
            let sleep_duration = self.debouncer.sleep_duration();
            tokio::select! {
                biased;
                msg = self.rx.recv() => {
                    match msg {
                        // Channel gone means every facade handle dropped
                        Some(EngineMsg::Dispose) | None => {
                            self.dispose();
                            break;
                        }
                        Some(msg) => self.handle(msg),
                    }
                }
                _ = tokio::time::sleep(sleep_duration) => {
                    if let Some(input) = self.debouncer.take_if_ready() {
                        self.compile(&input);
                    }
                }
            }
        }
    }

    fn handle(&mut self, msg: EngineMsg) {
        match msg {
            EngineMsg::Compile(input) => {
                debug!("engine"; "staged {} compile", input.label());
                self.debouncer.stage(input);
                if self.state.is_visible {
                    self.update(|s| s.is_compiling = true);
                } else {
                    // Hidden: keep the input staged, attempt nothing until
                    // visibility returns
                    self.debouncer.cancel();
                }
            }
            EngineMsg::SetVisible(visible) => self.set_visible(visible),
            EngineMsg::Refresh => {
                if self.state.is_visible && self.debouncer.has_staged() {
                    self.debouncer.rearm_now();
                    self.update(|s| s.is_compiling = true);
                }
            }
            // Handled in run()
            EngineMsg::Dispose => {}
        }
    }

    fn set_visible(&mut self, visible: bool) {
        // Idempotent: same-value transitions trigger nothing
        if visible == self.state.is_visible {
            return;
        }

        if visible {
            self.update(|s| s.is_visible = true);
            if self.debouncer.has_staged() {
                // Re-trigger the staged input immediately, no quiescence wait
                self.debouncer.rearm_now();
                self.update(|s| s.is_compiling = true);
            }
        } else {
            if self.debouncer.is_pending() {
                debug!("engine"; "hidden: cancelling pending compile");
            }
            self.debouncer.cancel();
            self.update(|s| {
                s.is_visible = false;
                s.is_compiling = false;
            });
        }
    }

    /// Run one compile: synthesis path selection, sandbox swap, state publish.
    fn compile(&mut self, input: &CompileInput) {
        debug!("engine"; "compiling {}", input.label());

        let result = match input {
            CompileInput::Fragment(fragment) => synth::synthesize(fragment),
            CompileInput::Project { name, files } => {
                let entries = resolve_entries(files);
                Ok(Some(assemble::assemble(name, &entries)))
            }
        };

        match result {
            Ok(Some(doc)) => match self.swap_content(&doc) {
                Ok(()) => self.update(|s| {
                    s.is_compiling = false;
                    s.error = None;
                    s.document = Some(doc);
                }),
                Err(e) => {
                    // Recoverable: any later compile/refresh retries the mount
                    log!("engine"; "sandbox error: {e}");
                    self.update(|s| {
                        s.is_compiling = false;
                        s.error = Some(e.to_string());
                    });
                }
            },
            Ok(None) => {
                // Nothing to render - distinct from an error
                self.update(|s| {
                    s.is_compiling = false;
                    s.error = None;
                    s.document = None;
                });
            }
            Err(e) => {
                // Sandbox keeps its last good content, never a half-built document
                log!("engine"; "synthesis failed: {e}");
                self.update(|s| {
                    s.is_compiling = false;
                    s.error = Some(e.to_string());
                });
            }
        }
    }

    fn swap_content(&mut self, doc: &CompiledDocument) -> Result<(), SandboxError> {
        if self.sandbox.is_none() {
            self.sandbox = Some(SandboxManager::mount(Arc::clone(&self.host))?);
        }
        match self.sandbox.as_ref() {
            Some(sandbox) => sandbox.set_content(doc),
            None => Err(SandboxError::Disposed),
        }
    }

    fn dispose(&mut self) {
        self.debouncer.cancel();
        if let Some(mut sandbox) = self.sandbox.take() {
            sandbox.dispose();
        }
        self.update(|s| {
            s.is_compiling = false;
            s.disposed = true;
        });
        debug!("engine"; "disposed");
    }

    fn update(&mut self, f: impl FnOnce(&mut PreviewState)) {
        f(&mut self.state);
        // Receivers may all be gone; state is still authoritative here
        let _ = self.state_tx.send(self.state.clone());
    }
}
