//! Hand-rolled test doubles for the ports: a manual clock, in-memory and
//! failing bucket stores, and a detector that replays scripted samples.

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use studywatch::{BucketStore, Clock, DailyBucket, DetectionSample, Detector};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Clock that only moves when the test says so.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance_ms(&self, ms: i64) {
        let mut guard = self.now.lock().unwrap();
        *guard += Duration::milliseconds(ms);
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap() = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Bucket store backed by a map; records every write for assertions.
#[derive(Default)]
pub struct MemoryBucketStore {
    buckets: Mutex<BTreeMap<NaiveDate, u64>>,
    writes: Mutex<Vec<(NaiveDate, u64)>>,
}

impl MemoryBucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(day: NaiveDate, seconds: u64) -> Self {
        let store = Self::default();
        store.buckets.lock().unwrap().insert(day, seconds);
        store
    }

    pub fn seconds(&self, day: NaiveDate) -> Option<u64> {
        self.buckets.lock().unwrap().get(&day).copied()
    }

    pub fn writes(&self) -> Vec<(NaiveDate, u64)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

#[async_trait]
impl BucketStore for MemoryBucketStore {
    async fn get_seconds(&self, day: NaiveDate) -> Result<Option<u64>> {
        Ok(self.seconds(day))
    }

    async fn set_seconds(&self, day: NaiveDate, seconds: u64) -> Result<()> {
        self.buckets.lock().unwrap().insert(day, seconds);
        self.writes.lock().unwrap().push((day, seconds));
        Ok(())
    }

    async fn delete_day(&self, day: NaiveDate) -> Result<()> {
        self.buckets.lock().unwrap().remove(&day);
        Ok(())
    }

    async fn list_days(&self) -> Result<Vec<DailyBucket>> {
        let updated_at = Utc::now();
        Ok(self
            .buckets
            .lock()
            .unwrap()
            .iter()
            .rev()
            .map(|(day, seconds)| DailyBucket {
                day: *day,
                study_seconds: *seconds,
                updated_at,
            })
            .collect())
    }
}

/// Store whose every operation fails; the timer must shrug this off.
pub struct FailingBucketStore;

#[async_trait]
impl BucketStore for FailingBucketStore {
    async fn get_seconds(&self, _day: NaiveDate) -> Result<Option<u64>> {
        Err(anyhow!("store unavailable"))
    }

    async fn set_seconds(&self, _day: NaiveDate, _seconds: u64) -> Result<()> {
        Err(anyhow!("store unavailable"))
    }

    async fn delete_day(&self, _day: NaiveDate) -> Result<()> {
        Err(anyhow!("store unavailable"))
    }

    async fn list_days(&self) -> Result<Vec<DailyBucket>> {
        Err(anyhow!("store unavailable"))
    }
}

/// Detector that replays a scripted sequence, then repeats a fallback.
pub struct ScriptedDetector {
    script: Mutex<VecDeque<DetectionSample>>,
    fallback: DetectionSample,
    calls: Mutex<usize>,
}

impl ScriptedDetector {
    pub fn new(script: Vec<DetectionSample>, fallback: DetectionSample) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Detector for ScriptedDetector {
    async fn detect(&self) -> Result<DetectionSample> {
        *self.calls.lock().unwrap() += 1;
        let next = self.script.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }
}

/// Sample that classifies as `Reading` under default thresholds.
pub fn reading_sample() -> DetectionSample {
    use studywatch::{FaceBox, FaceLandmarks, Point};

    DetectionSample {
        face: Some(FaceBox {
            top: 60.0,
            left: 200.0,
            width: 110.0,
            height: 150.0,
        }),
        landmarks: Some(FaceLandmarks {
            nose: Point { x: 320.0, y: 215.0 },
            left_eye: Point { x: 300.0, y: 200.0 },
        }),
        top_strip: None,
    }
}

/// Sample that classifies as `Standing` under default thresholds.
pub fn standing_sample() -> DetectionSample {
    use studywatch::{FaceBox, FaceLandmarks, Point};

    DetectionSample {
        face: Some(FaceBox {
            top: 20.0,
            left: 280.0,
            width: 60.0,
            height: 80.0,
        }),
        landmarks: Some(FaceLandmarks {
            nose: Point { x: 320.0, y: 200.0 },
            left_eye: Point { x: 310.0, y: 200.0 },
        }),
        top_strip: None,
    }
}
