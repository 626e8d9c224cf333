use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::store::BucketStore;
use crate::timer::format_hms;

/// One line of the daily report: `YYYY-MM-DD: HH:MM:SS`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportLine {
    pub day: NaiveDate,
    pub study_seconds: u64,
    pub formatted: String,
}

/// Every persisted day, newest first. Days that were reset to zero stay
/// visible as `00:00:00` entries; rendering is the UI's concern.
pub async fn daily_report(store: &dyn BucketStore) -> Result<Vec<ReportLine>> {
    let buckets = store.list_days().await?;

    Ok(buckets
        .into_iter()
        .map(|bucket| ReportLine {
            day: bucket.day,
            study_seconds: bucket.study_seconds,
            formatted: format_hms(bucket.study_seconds),
        })
        .collect())
}
