use serde::{Deserialize, Serialize};

use crate::models::domain::ScoredProperty;

/// Response for the find-matches endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub lead_id: String,
    pub matches: Vec<ScoredProperty>,
    /// Properties considered before filtering and scoring.
    pub total_properties: usize,
}

/// Response for the inline scoring endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub matches: Vec<ScoredProperty>,
    pub total_properties: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStats>,
}

/// Cache statistics embedded in the health response when caching is
/// active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Error envelope returned by every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    /// Generated identifier logged alongside 5xx failures so a support
    /// report can be correlated with the server logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
}
