//! Core of a webcam-presence study stopwatch: a pose classifier turns
//! per-tick detection results into activity labels, and a presence timer
//! turns labels into accrued study seconds with per-day totals in SQLite.

pub mod classify;
pub mod clock;
pub mod report;
pub mod sensing;
pub mod settings;
pub mod store;
pub mod timer;
mod utils;
mod watch;

pub use classify::{
    classify, ActivityLabel, ClassifierConfig, DetectionSample, FaceBox, FaceLandmarks, Point,
    StripSample,
};
pub use clock::{Clock, SystemClock};
pub use report::{daily_report, ReportLine};
pub use sensing::{Detector, SensingController, WatchConfig};
pub use settings::{SettingsStore, WatchSettings};
pub use store::{BucketStore, DailyBucket, SqliteBucketStore};
pub use timer::{
    format_hms, TimerConfig, TimerController, TimerSnapshot, TimerState, TimerStatus, Transition,
};
pub use watch::StudyWatch;
