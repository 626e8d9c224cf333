use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::report::{daily_report, ReportLine};
use crate::sensing::{Detector, SensingController};
use crate::settings::WatchSettings;
use crate::store::BucketStore;
use crate::timer::{TimerController, TimerSnapshot};

/// Top-level wiring: one timer, one watch loop, one bucket store.
///
/// This is the surface the UI layer consumes: start/stop the sampling
/// loop, read the formatted elapsed time, reset, list the daily report.
pub struct StudyWatch {
    timer: TimerController,
    sensing: Mutex<SensingController>,
    detector: Arc<dyn Detector>,
    store: Arc<dyn BucketStore>,
    settings: WatchSettings,
}

impl StudyWatch {
    pub async fn new(
        store: Arc<dyn BucketStore>,
        detector: Arc<dyn Detector>,
        clock: Arc<dyn Clock>,
        settings: WatchSettings,
    ) -> Self {
        let timer = TimerController::new(store.clone(), clock, settings.timer.clone()).await;

        Self {
            timer,
            sensing: Mutex::new(SensingController::new()),
            detector,
            store,
            settings,
        }
    }

    /// Begin sampling. Errors if the watch loop is already active.
    pub async fn start(&self) -> Result<()> {
        self.sensing.lock().await.start_watching(
            self.detector.clone(),
            self.timer.clone(),
            self.settings.classifier.clone(),
            self.settings.watch.clone(),
        )
    }

    /// Suspend sampling entirely (e.g. the app went to the background).
    /// Missed ticks are not replayed on resume; a long gap reads as an
    /// extended absence and pauses the timer through the grace window.
    pub async fn stop(&self) -> Result<()> {
        self.sensing.lock().await.stop_watching().await
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot().await
    }

    pub async fn reset(&self) {
        self.timer.reset().await
    }

    pub async fn daily_report(&self) -> Result<Vec<ReportLine>> {
        daily_report(self.store.as_ref()).await
    }

    pub fn timer(&self) -> &TimerController {
        &self.timer
    }
}
