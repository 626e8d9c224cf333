use anyhow::Result;
use async_trait::async_trait;

use crate::classify::DetectionSample;

/// Face/landmark detection behind the camera pipeline.
///
/// The implementation owns frame acquisition and the detection model; the
/// watch loop only sees the per-tick result. Errors are downgraded by the
/// caller to an absence, never escalated.
#[async_trait]
pub trait Detector: Send + Sync {
    async fn detect(&self) -> Result<DetectionSample>;
}
