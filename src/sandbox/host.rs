//! Sandbox host capability.
//!
//! The engine never touches a rendering surface directly: it drives an
//! implementation of `SandboxHost` supplied by the embedding platform (an
//! iframe bridge, a webview, ...). The host owns the actual isolation
//! primitive; the engine owns the lifecycle discipline around it.
//!
//! `MemoryHost` is the in-process reference implementation used by tests
//! and headless embeddings.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::SandboxError;

/// Identifies one mounted rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Ephemeral, revocable reference to in-memory document content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub u64);

/// Host platform capability to mount sandboxed surfaces and manage
/// memory-backed content handles.
#[async_trait]
pub trait SandboxHost: Send + Sync {
    /// Mount a new isolated rendering surface.
    fn mount(&self) -> Result<SurfaceId, SandboxError>;

    /// Allocate a memory-backed content handle for a document.
    fn alloc_content(&self, html: &str) -> Result<ContentId, SandboxError>;

    /// Begin loading content into a surface. Resolves when the surface
    /// finishes its load handshake; may resolve out of order across calls.
    async fn begin_load(
        &self,
        surface: SurfaceId,
        content: ContentId,
    ) -> Result<(), SandboxError>;

    /// Make loaded content visible on the surface. Synchronous swap.
    fn present(&self, surface: SurfaceId, content: ContentId) -> Result<(), SandboxError>;

    /// Revoke a content handle, reclaiming its memory.
    fn revoke_content(&self, content: ContentId);

    /// Tear down a surface.
    fn unmount(&self, surface: SurfaceId);
}

/// In-memory reference host.
///
/// Content handles live in a concurrent map so in-flight load tasks and the
/// engine actor can touch the store simultaneously. Load latency is
/// configurable per call (FIFO queue) to exercise out-of-order completion.
#[derive(Default)]
pub struct MemoryHost {
    contents: DashMap<ContentId, Arc<str>>,
    /// Presented content per mounted surface (`None` = mounted, blank)
    surfaces: DashMap<SurfaceId, Option<ContentId>>,
    next_id: AtomicU64,
    /// Per-load latencies, popped FIFO; empty queue means instant loads
    load_delays: Mutex<VecDeque<Duration>>,
    alloc_count: AtomicU64,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue latencies for upcoming `begin_load` calls (test hook).
    pub fn queue_load_delays(&self, delays: impl IntoIterator<Item = Duration>) {
        self.load_delays.lock().extend(delays);
    }

    /// Number of live (allocated, not yet revoked) content handles.
    pub fn live_content_count(&self) -> usize {
        self.contents.len()
    }

    /// Total content allocations so far (one per compile that reached the sandbox).
    pub fn alloc_count(&self) -> u64 {
        self.alloc_count.load(Ordering::SeqCst)
    }

    pub fn is_mounted(&self, surface: SurfaceId) -> bool {
        self.surfaces.contains_key(&surface)
    }

    /// HTML currently presented on a surface, if any.
    pub fn presented_html(&self, surface: SurfaceId) -> Option<Arc<str>> {
        let presented = (*self.surfaces.get(&surface)?)?;
        self.contents.get(&presented).map(|c| Arc::clone(&c))
    }

    /// Presented HTML of the only mounted surface. Convenience for
    /// embeddings driving a single preview slot.
    pub fn sole_presented_html(&self) -> Option<Arc<str>> {
        let surface = self.surfaces.iter().next().map(|entry| *entry.key())?;
        self.presented_html(surface)
    }

    fn next(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl SandboxHost for MemoryHost {
    fn mount(&self) -> Result<SurfaceId, SandboxError> {
        let surface = SurfaceId(self.next());
        self.surfaces.insert(surface, None);
        Ok(surface)
    }

    fn alloc_content(&self, html: &str) -> Result<ContentId, SandboxError> {
        let content = ContentId(self.next());
        self.contents.insert(content, Arc::from(html));
        self.alloc_count.fetch_add(1, Ordering::SeqCst);
        Ok(content)
    }

    async fn begin_load(
        &self,
        surface: SurfaceId,
        content: ContentId,
    ) -> Result<(), SandboxError> {
        let delay = self.load_delays.lock().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if !self.surfaces.contains_key(&surface) {
            return Err(SandboxError::LoadFailed("surface unmounted".into()));
        }
        if !self.contents.contains_key(&content) {
            // Handle revoked mid-load (superseded by a newer swap)
            return Err(SandboxError::LoadFailed("content handle revoked".into()));
        }
        Ok(())
    }

    fn present(&self, surface: SurfaceId, content: ContentId) -> Result<(), SandboxError> {
        if !self.contents.contains_key(&content) {
            return Err(SandboxError::LoadFailed("content handle revoked".into()));
        }
        match self.surfaces.get_mut(&surface) {
            Some(mut slot) => {
                *slot = Some(content);
                Ok(())
            }
            None => Err(SandboxError::LoadFailed("surface unmounted".into())),
        }
    }

    fn revoke_content(&self, content: ContentId) {
        self.contents.remove(&content);
    }

    fn unmount(&self, surface: SurfaceId) {
        self.surfaces.remove(&surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mount_alloc_present_roundtrip() {
        let host = MemoryHost::new();
        let surface = host.mount().unwrap();
        let content = host.alloc_content("<p>x</p>").unwrap();
        host.begin_load(surface, content).await.unwrap();
        host.present(surface, content).unwrap();
        assert_eq!(host.presented_html(surface).unwrap().as_ref(), "<p>x</p>");
    }

    #[tokio::test]
    async fn test_load_fails_after_revoke() {
        let host = MemoryHost::new();
        let surface = host.mount().unwrap();
        let content = host.alloc_content("<p>x</p>").unwrap();
        host.revoke_content(content);
        assert!(host.begin_load(surface, content).await.is_err());
        assert_eq!(host.live_content_count(), 0);
    }

    #[tokio::test]
    async fn test_unmount_clears_surface() {
        let host = MemoryHost::new();
        let surface = host.mount().unwrap();
        host.unmount(surface);
        assert!(!host.is_mounted(surface));
        let content = host.alloc_content("x").unwrap();
        assert!(host.present(surface, content).is_err());
    }
}
