use serde::Deserialize;
use std::collections::HashMap;

use crate::core::wire::RawNum;

/* ---------------- Serde mapping (only what we need) ---------------- */

#[derive(Deserialize)]
pub(crate) struct TimeseriesEnvelope {
    pub(crate) timeseries: Option<TimeseriesResult>,
    /// Auth failures come back wrapped in `finance.error` instead.
    pub(crate) finance: Option<FinanceNode>,
}

#[derive(Deserialize)]
pub(crate) struct TimeseriesResult {
    pub(crate) result: Option<Vec<TimeseriesData>>,
    pub(crate) error: Option<ErrorNode>,
}

#[derive(Deserialize)]
pub(crate) struct FinanceNode {
    pub(crate) error: Option<ErrorNode>,
}

#[derive(Deserialize)]
pub(crate) struct ErrorNode {
    pub(crate) code: Option<String>,
    pub(crate) description: Option<String>,
}

impl ErrorNode {
    pub(crate) fn message(&self) -> String {
        match (&self.code, &self.description) {
            (Some(c), Some(d)) => format!("{c}: {d}"),
            (None, Some(d)) => d.clone(),
            (Some(c), None) => c.clone(),
            (None, None) => "unknown error".into(),
        }
    }

    pub(crate) fn is_invalid_crumb(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| d.to_ascii_lowercase().contains("invalid crumb"))
    }
}

#[derive(Deserialize)]
pub(crate) struct TimeseriesData {
    pub(crate) timestamp: Option<Vec<i64>>,
    /// Remaining keys: `meta`, plus exactly one `quarterly<Key>` array when data exists.
    #[serde(flatten)]
    pub(crate) values: HashMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
pub(crate) struct TimeseriesValue {
    #[serde(rename = "asOfDate")]
    pub(crate) as_of_date: Option<String>,
    #[serde(rename = "reportedValue")]
    pub(crate) reported_value: Option<RawNum<f64>>,
}
