pub mod config;
pub mod controller;
pub mod state;

pub use config::TimerConfig;
pub use controller::{TimerController, TimerSnapshot};
pub use state::{format_hms, TimerState, TimerStatus, Transition};
