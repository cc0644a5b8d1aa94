//! Error types for the preview pipeline.
//!
//! Taxonomy:
//! - degraded synthesis (malformed input) is NOT an error - synthesizers
//!   always produce best-effort output;
//! - `SynthError` - the synthesizer itself failed; caught at the dispatch
//!   boundary, surfaced via `PreviewState::error`, no document swap;
//! - `SandboxError` - the host isolation primitive failed; recoverable,
//!   retried by any subsequent compile/refresh;
//! - `EngineError` - reported programmer errors at the facade (never panics);
//! - runtime faults of untrusted code (a script throwing inside the rendered
//!   document) stay inside the sandbox as visible error text and never reach
//!   these types.

use thiserror::Error;

/// Synthesis-boundary failure.
#[derive(Debug, Error)]
pub enum SynthError {
    /// A synthesizer panicked while processing a fragment
    #[error("synthesis failed: {0}")]
    Panicked(String),
}

/// Sandbox lifecycle failure.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// The host could not mount an isolated rendering surface
    #[error("failed to mount rendering surface: {0}")]
    MountFailed(String),

    /// The host could not allocate a memory-backed content handle
    #[error("failed to allocate content handle: {0}")]
    AllocFailed(String),

    /// A content load handshake failed (e.g. handle revoked mid-load)
    #[error("content load failed: {0}")]
    LoadFailed(String),

    /// Operation on an already-disposed sandbox slot
    #[error("sandbox slot already disposed")]
    Disposed,
}

/// Engine facade failure.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Operation after `dispose()` - reported, never a crash
    #[error("preview engine already disposed")]
    Disposed,

    /// The engine actor is gone (runtime shut down)
    #[error("preview engine channel closed")]
    Closed,
}
