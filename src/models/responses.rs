use serde::{Deserialize, Serialize};

use crate::models::config::ConfigWarning;
use crate::models::results::{MatchResult, MatchRunMeta};

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub run_id: String,
    pub results: Vec<MatchResult>,
    pub meta: MatchRunMeta,
    /// Questionable settings in the resolved config; never fatal
    pub config_warnings: Vec<ConfigWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFlagsResponse {
    pub flags: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
