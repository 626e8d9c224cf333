use std::sync::Arc;

use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::classify::{classify, ClassifierConfig, DetectionSample, StripSample};
use crate::timer::{TimerController, Transition};

use super::ports::Detector;
use super::WatchConfig;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

// Import the logging macros (exported at crate root)
use crate::{log_info, log_warn};

const DETECT_TIMEOUT_SECS: u64 = 10;

/// Periodic sampling loop: detect, classify, feed the timer.
///
/// Ticks never overlap (the next tick waits for this one's effects), and
/// missed ticks are not replayed — a suspension gap reads as an extended
/// absence, which the timer's grace window absorbs. The last seen top
/// strip is carried forward for the motion heuristic.
pub async fn watch_loop(
    detector: Arc<dyn Detector>,
    timer: TimerController,
    classifier: ClassifierConfig,
    config: WatchConfig,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut previous_strip: Option<StripSample> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let fut = detector.detect();
                let sample = match tokio::time::timeout(Duration::from_secs(DETECT_TIMEOUT_SECS), fut).await {
                    Ok(Ok(sample)) => sample,
                    Ok(Err(err)) => {
                        log_warn!("detection failed, treating as absence: {err:?}");
                        DetectionSample::empty()
                    }
                    Err(_) => {
                        log_warn!("detection timeout (> {}s), treating as absence", DETECT_TIMEOUT_SECS);
                        DetectionSample::empty()
                    }
                };

                let label = classify(&sample, previous_strip.as_ref(), &classifier);
                let transition = timer.on_label(label).await;

                match transition {
                    Transition::Resumed => log_info!("studying resumed ({})", label.as_str()),
                    Transition::Suspended => log_info!("studying paused ({})", label.as_str()),
                    Transition::Ticked | Transition::Idle => {}
                }

                previous_strip = sample.top_strip;
            }
            _ = cancel_token.cancelled() => {
                log_info!("watch loop shutting down");
                break;
            }
        }
    }
}
