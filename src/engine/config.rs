//! Engine configuration.

use std::time::Duration;

/// Default quiescence window: one rebuild per 300ms of sustained typing.
const QUIESCENCE_MS: u64 = 300;

/// Tuning for one preview slot.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum idle time after the last edit before recompilation triggers
    pub quiescence: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quiescence: Duration::from_millis(QUIESCENCE_MS),
        }
    }
}

impl EngineConfig {
    pub fn with_quiescence(quiescence: Duration) -> Self {
        Self { quiescence }
    }
}
