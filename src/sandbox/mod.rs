//! Sandbox Lifecycle Manager
//!
//! Owns creation and destruction of one isolated rendering surface and the
//! memory-backed content handles it allocates. Two invariants hold at all
//! times:
//!
//! - at most one live content handle exists per surface: allocating a new
//!   one synchronously revokes the previous one;
//! - last-write-wins: every swap carries a monotonically increasing
//!   sequence number, compared again when the host's asynchronous load
//!   handshake completes, so a stale load's completion never overwrites a
//!   newer swap's effect.

mod host;

pub use host::{ContentId, MemoryHost, SandboxHost, SurfaceId};

use parking_lot::Mutex;
use std::sync::Arc;

use crate::doc::CompiledDocument;
use crate::error::SandboxError;
use crate::{debug, log};

/// Per-slot swap state shared with in-flight load tasks.
#[derive(Debug, Default)]
struct SlotState {
    /// The single live content handle; the previous one is revoked on swap
    live: Option<ContentId>,
    /// Sequence of the newest issued swap
    issued_seq: u64,
    /// Sequence of the newest presented swap
    presented_seq: u64,
}

/// Owns one mounted rendering surface plus zero-or-one live content handle.
pub struct SandboxManager {
    host: Arc<dyn SandboxHost>,
    surface: SurfaceId,
    slot: Arc<Mutex<SlotState>>,
    disposed: bool,
}

impl SandboxManager {
    /// Mount a fresh surface on the host.
    pub fn mount(host: Arc<dyn SandboxHost>) -> Result<Self, SandboxError> {
        let surface = host.mount()?;
        debug!("sandbox"; "mounted surface {:?}", surface);
        Ok(Self {
            host,
            surface,
            slot: Arc::new(Mutex::new(SlotState::default())),
            disposed: false,
        })
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Swap the surface's content to `doc`.
    ///
    /// Non-blocking: the host load handshake runs on a spawned task. Only
    /// the newest swap presents; stale completions are discarded. Must be
    /// called from within a tokio runtime.
    pub fn set_content(&self, doc: &CompiledDocument) -> Result<(), SandboxError> {
        if self.disposed {
            return Err(SandboxError::Disposed);
        }

        let content = self.host.alloc_content(&doc.html)?;
        let seq = {
            let mut slot = self.slot.lock();
            slot.issued_seq += 1;
            if let Some(prev) = slot.live.replace(content) {
                // Swap first, reclaim immediately after: never two live handles
                self.host.revoke_content(prev);
            }
            slot.issued_seq
        };

        let host = Arc::clone(&self.host);
        let slot = Arc::clone(&self.slot);
        let surface = self.surface;
        tokio::spawn(async move {
            match host.begin_load(surface, content).await {
                Ok(()) => {
                    let mut slot = slot.lock();
                    if seq == slot.issued_seq && seq > slot.presented_seq {
                        match host.present(surface, content) {
                            Ok(()) => slot.presented_seq = seq,
                            Err(e) => log!("sandbox"; "present failed (seq {}): {}", seq, e),
                        }
                    } else {
                        debug!("sandbox"; "discarding stale load (seq {} < {})", seq, slot.issued_seq);
                    }
                }
                Err(e) => debug!("sandbox"; "load aborted (seq {}): {}", seq, e),
            }
        });

        Ok(())
    }

    /// Reclaim the live content handle and unmount the surface.
    ///
    /// Idempotent. In-flight loads are invalidated by bumping the sequence.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let mut slot = self.slot.lock();
        if let Some(live) = slot.live.take() {
            self.host.revoke_content(live);
        }
        slot.issued_seq += 1;
        drop(slot);

        self.host.unmount(self.surface);
        debug!("sandbox"; "disposed surface {:?}", self.surface);
    }
}

impl Drop for SandboxManager {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    fn doc(html: &str) -> CompiledDocument {
        CompiledDocument::new(html)
    }

    async fn wait_for_presented(host: &MemoryHost, surface: SurfaceId, needle: &str) {
        for _ in 0..200 {
            if let Some(html) = host.presented_html(surface)
                && html.contains(needle)
            {
                return;
            }
            sleep(Duration::from_millis(5)).await;
        }
        panic!("content containing {needle:?} never presented");
    }

    #[tokio::test]
    async fn test_at_most_one_live_handle_across_sequential_swaps() {
        let host = Arc::new(MemoryHost::new());
        let manager = SandboxManager::mount(Arc::clone(&host) as Arc<dyn SandboxHost>).unwrap();

        for i in 0..10 {
            manager.set_content(&doc(&format!("<p>{i}</p>"))).unwrap();
            assert!(host.live_content_count() <= 1, "leaked handle at swap {i}");
        }
        wait_for_presented(&host, manager.surface(), "<p>9</p>").await;
        assert_eq!(host.live_content_count(), 1);
    }

    #[tokio::test]
    async fn test_last_write_wins_with_inverted_completion_order() {
        let host = Arc::new(MemoryHost::new());
        // First load is slow, second is fast: A's completion arrives after B's
        host.queue_load_delays([Duration::from_millis(80), Duration::from_millis(5)]);
        let manager = SandboxManager::mount(Arc::clone(&host) as Arc<dyn SandboxHost>).unwrap();

        manager.set_content(&doc("<p>A</p>")).unwrap();
        manager.set_content(&doc("<p>B</p>")).unwrap();

        wait_for_presented(&host, manager.surface(), "<p>B</p>").await;
        // Give A's stale completion time to arrive; it must not win
        sleep(Duration::from_millis(120)).await;
        let html = host.presented_html(manager.surface()).unwrap();
        assert!(html.contains("<p>B</p>"));
    }

    #[tokio::test]
    async fn test_set_content_after_dispose_is_reported_error() {
        let host = Arc::new(MemoryHost::new());
        let mut manager = SandboxManager::mount(Arc::clone(&host) as Arc<dyn SandboxHost>).unwrap();
        manager.set_content(&doc("<p>x</p>")).unwrap();
        manager.dispose();

        assert!(matches!(
            manager.set_content(&doc("<p>y</p>")),
            Err(SandboxError::Disposed)
        ));
        assert_eq!(host.live_content_count(), 0);
        assert!(!host.is_mounted(manager.surface()));
    }

    #[tokio::test]
    async fn test_dispose_is_idempotent() {
        let host = Arc::new(MemoryHost::new());
        let mut manager = SandboxManager::mount(Arc::clone(&host) as Arc<dyn SandboxHost>).unwrap();
        manager.dispose();
        manager.dispose();
        assert_eq!(host.live_content_count(), 0);
    }

    #[tokio::test]
    async fn test_drop_reclaims_resources() {
        let host = Arc::new(MemoryHost::new());
        let surface;
        {
            let manager =
                SandboxManager::mount(Arc::clone(&host) as Arc<dyn SandboxHost>).unwrap();
            surface = manager.surface();
            manager.set_content(&doc("<p>x</p>")).unwrap();
        }
        assert_eq!(host.live_content_count(), 0);
        assert!(!host.is_mounted(surface));
    }
}
