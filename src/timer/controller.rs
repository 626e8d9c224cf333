use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use log::warn;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::classify::ActivityLabel;
use crate::clock::Clock;
use crate::store::BucketStore;

use super::state::{format_hms, TimerState, TimerStatus, Transition};
use super::TimerConfig;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub day: NaiveDate,
    pub elapsed_ms: u64,
    /// `HH:MM:SS`, hours unbounded.
    pub display: String,
}

/// Owns the timer state and is the sole writer of daily buckets.
///
/// Collaborator failures stop at this boundary: a failed bucket write is
/// logged and dropped, the in-memory state stays authoritative, and the
/// next tick's write retries naturally.
#[derive(Clone)]
pub struct TimerController {
    state: Arc<Mutex<TimerState>>,
    store: Arc<dyn BucketStore>,
    clock: Arc<dyn Clock>,
    config: TimerConfig,
}

impl TimerController {
    /// Seeds the accumulator from today's bucket; a failed read logs and
    /// starts from zero.
    pub async fn new(
        store: Arc<dyn BucketStore>,
        clock: Arc<dyn Clock>,
        config: TimerConfig,
    ) -> Self {
        let today = clock.today();
        let seeded_ms = match store.get_seconds(today).await {
            Ok(Some(seconds)) => seconds.saturating_mul(1000),
            Ok(None) => 0,
            Err(err) => {
                warn!("Failed to read today's bucket, starting from zero: {err:?}");
                0
            }
        };

        Self {
            state: Arc::new(Mutex::new(TimerState::seeded(today, seeded_ms))),
            store,
            clock,
            config,
        }
    }

    /// Feed one tick's label through the state machine and apply its
    /// persistence effects.
    pub async fn on_label(&self, label: ActivityLabel) -> Transition {
        let now = self.clock.now();
        let today = self.clock.today();
        let grace = Duration::milliseconds(self.config.grace_window_ms as i64);

        let (transition, writes) = {
            let mut state = self.state.lock().await;
            let mut writes: Vec<(NaiveDate, u64)> = Vec::new();

            if state.day != today {
                // Finalize the old day as of the rollover tick; a running
                // session continues into the new day from zero.
                writes.push((state.day, state.elapsed_ms(now) / 1000));
                state.roll_over(today, now);
            }

            let transition = state.apply_label(label, now, grace);

            match transition {
                Transition::Suspended => {
                    state.ticks_since_persist = 0;
                    writes.push((state.day, state.elapsed_ms(now) / 1000));
                }
                Transition::Resumed | Transition::Ticked => {
                    state.ticks_since_persist += 1;
                    if state.ticks_since_persist >= self.config.persist_every_ticks {
                        state.ticks_since_persist = 0;
                        writes.push((state.day, state.elapsed_ms(now) / 1000));
                    }
                }
                Transition::Idle => {}
            }

            (transition, writes)
        };

        for (day, seconds) in writes {
            self.persist(day, seconds).await;
        }

        transition
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        let now = self.clock.now();
        let state = self.state.lock().await;
        let elapsed_ms = state.elapsed_ms(now);

        TimerSnapshot {
            status: state.status,
            day: state.day,
            elapsed_ms,
            display: format_hms(elapsed_ms / 1000),
        }
    }

    /// User-triggered reset: Paused, zeroed, today's bucket overwritten
    /// to 0 (the row is kept, not deleted). Idempotent.
    pub async fn reset(&self) {
        let today = self.clock.today();
        {
            let mut state = self.state.lock().await;
            state.reset(today);
        }
        self.persist(today, 0).await;
    }

    async fn persist(&self, day: NaiveDate, seconds: u64) {
        if let Err(err) = self.store.set_seconds(day, seconds).await {
            warn!("Failed to persist daily bucket for {day}: {err:?}");
        }
    }
}
