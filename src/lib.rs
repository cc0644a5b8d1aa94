//! Glance - live preview compilation and sandboxed rendering engine.
//!
//! Takes in-progress, multi-language source text from an editing workspace
//! and turns it into a safely isolated, continuously refreshed rendering,
//! with no build step and no network round-trip.
//!
//! # Architecture
//!
//! ```text
//! editor change → PreviewEngine → Debouncer → synth / assemble → SandboxManager → host surface
//!    (compile)     (facade)      (quiescence)  (document string)  (last-write-wins)
//! ```
//!
//! The engine is a single actor task owning all preview state. Synthesis is
//! pure, synchronous string transformation; the only asynchronous boundaries
//! are the debounce timer and the sandbox host's content-load handshake.
//!
//! # Modules
//!
//! - `doc` - source fragments, language tags, compiled documents
//! - `synth` - per-dialect document synthesizers
//! - `project` - project file read model and entry resolution
//! - `assemble` - whole-project composite assembly
//! - `sandbox` - rendering surface lifecycle and content handles
//! - `engine` - orchestrator state machine and public facade

pub mod assemble;
pub mod doc;
pub mod engine;
pub mod error;
pub mod logger;
pub mod project;
pub mod sandbox;
pub mod synth;

pub use doc::{CompiledDocument, LanguageTag, SourceFragment};
pub use engine::{CompileInput, EngineConfig, Phase, PreviewEngine, PreviewState};
pub use error::{EngineError, SandboxError, SynthError};
pub use project::{ProjectEntries, ProjectFileView, resolve_entries};
pub use sandbox::{ContentId, MemoryHost, SandboxHost, SandboxManager, SurfaceId};
