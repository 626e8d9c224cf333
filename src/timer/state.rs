use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::ActivityLabel;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    Running,
    Paused,
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Paused
    }
}

/// What one tick did to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Paused -> Running
    Resumed,
    /// Stayed Running
    Ticked,
    /// Running -> Paused; the frozen total should be persisted
    Suspended,
    /// Stayed Paused
    Idle,
}

/// Presence timer state for one calendar day.
///
/// `accumulated_ms` is the frozen baseline; while Running the current
/// interval accrues from `run_started_at` and combines with the baseline
/// to form the true elapsed time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub status: TimerStatus,
    /// Day the accumulated total belongs to.
    pub day: NaiveDate,
    pub accumulated_ms: u64,
    pub run_started_at: Option<DateTime<Utc>>,
    /// Most recent tick that classified as an active label; anchors the
    /// grace window.
    pub last_active_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub(crate) ticks_since_persist: u32,
}

impl TimerState {
    /// Fresh state for `day`, Paused, seeded with the day's stored total.
    pub fn seeded(day: NaiveDate, accumulated_ms: u64) -> Self {
        Self {
            status: TimerStatus::Paused,
            day,
            accumulated_ms,
            run_started_at: None,
            last_active_at: None,
            ticks_since_persist: 0,
        }
    }

    /// Elapsed study time as of `now`, including the in-flight interval.
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        match (self.status, self.run_started_at) {
            (TimerStatus::Running, Some(anchor)) => {
                let running = (now - anchor).num_milliseconds().max(0) as u64;
                self.accumulated_ms.saturating_add(running)
            }
            _ => self.accumulated_ms,
        }
    }

    /// Advance the state machine by one tick.
    ///
    /// Pure over `(self, label, now)`; the caller applies effects
    /// (display refresh, bucket writes) from the returned transition.
    pub fn apply_label(
        &mut self,
        label: ActivityLabel,
        now: DateTime<Utc>,
        grace: Duration,
    ) -> Transition {
        let within_grace = label == ActivityLabel::NoFace
            && self
                .last_active_at
                .map(|last| now - last < grace)
                .unwrap_or(false);

        match self.status {
            TimerStatus::Paused if label.is_active() || within_grace => {
                self.status = TimerStatus::Running;
                self.run_started_at = Some(now);
                if label.is_active() {
                    self.last_active_at = Some(now);
                }
                Transition::Resumed
            }
            TimerStatus::Paused => Transition::Idle,
            TimerStatus::Running if label.is_active() => {
                self.last_active_at = Some(now);
                Transition::Ticked
            }
            // Ambiguous absence inside the grace window keeps accruing;
            // the grace anchor itself is only moved by active ticks.
            TimerStatus::Running if within_grace => Transition::Ticked,
            TimerStatus::Running => {
                self.freeze(now);
                Transition::Suspended
            }
        }
    }

    /// Fold the in-flight interval into the baseline and stop accruing.
    pub fn freeze(&mut self, now: DateTime<Utc>) {
        self.accumulated_ms = self.elapsed_ms(now);
        self.status = TimerStatus::Paused;
        self.run_started_at = None;
    }

    /// User-triggered reset: Paused, zeroed, anchors cleared.
    pub fn reset(&mut self, day: NaiveDate) {
        *self = Self::seeded(day, 0);
    }

    /// Roll into a new day: the caller persists the old total; a Running
    /// session keeps running on a fresh anchor.
    pub fn roll_over(&mut self, day: NaiveDate, now: DateTime<Utc>) {
        self.day = day;
        self.accumulated_ms = 0;
        if self.status == TimerStatus::Running {
            self.run_started_at = Some(now);
        }
    }
}

/// Zero-padded `HH:MM:SS`; hours are unbounded, not wrapped at 24.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = total_seconds % 3600 / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
