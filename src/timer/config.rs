use serde::{Deserialize, Serialize};

/// Tunables for the presence timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// How long after the last active tick an ambiguous absence (no face)
    /// still counts as continued study.
    pub grace_window_ms: u64,

    /// Persist the running total every N ticks so an abrupt termination
    /// loses at most N seconds. Transitions into Paused always persist.
    pub persist_every_ticks: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            grace_window_ms: 180_000,
            persist_every_ticks: 1,
        }
    }
}
