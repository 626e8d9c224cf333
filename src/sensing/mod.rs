pub mod controller;
pub mod loop_worker;
pub mod ports;

pub use controller::SensingController;
pub use loop_worker::watch_loop;
pub use ports::Detector;

use serde::{Deserialize, Serialize};

/// Cadence of the sampling loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub tick_interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
        }
    }
}
