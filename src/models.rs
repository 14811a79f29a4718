use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub path: String,
    pub filename: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

pub type ImageCollection = BTreeMap<String, Vec<ImageRecord>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    #[serde(default)]
    pub total_images: u64,
    #[serde(default)]
    pub total_days: u64,
    #[serde(default)]
    pub total_size_mb: f64,
    #[serde(default)]
    pub first_date: Option<String>,
    #[serde(default)]
    pub last_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub size_kb: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeederEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub details: EventDetails,
}

#[derive(Debug, Serialize)]
pub struct DeleteMultipleRequest<'a> {
    pub paths: &'a [String],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteMultipleOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub deleted_count: u64,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CleanupRequest {
    pub days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanupOutcome {
    #[serde(default)]
    pub deleted_count: u64,
    #[serde(default)]
    pub days_threshold: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
