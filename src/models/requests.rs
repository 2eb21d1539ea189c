use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Lead, Property};

/// Request to find matches for a stored lead.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "lead_id", rename = "leadId")]
    pub lead_id: String,
    /// Maximum number of matches to return; server default applies when
    /// omitted, and the configured cap always wins.
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to score an inline lead against inline properties.
///
/// No backend access happens for this request; it exists so the scoring
/// policy can be exercised directly (weight tuning, debugging, support).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub lead: Lead,
    #[serde(default)]
    pub properties: Vec<Property>,
}
