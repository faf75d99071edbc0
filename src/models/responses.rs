use serde::{Deserialize, Serialize};
use crate::models::domain::{Group, Pair, Participant};
use crate::services::indicators::{GroupIndicators, PairIndicators};

/// Response for the plan endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    #[serde(rename = "planId")]
    pub plan_id: String,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Pair arena; group members index into this list
    pub pairs: Vec<Pair>,
    pub groups: Vec<Group>,
    #[serde(rename = "successorParticipants")]
    pub successor_participants: Vec<Participant>,
    #[serde(rename = "successorPairs")]
    pub successor_pairs: Vec<u32>,
    #[serde(rename = "pairIndicators")]
    pub pair_indicators: PairIndicators,
    #[serde(rename = "groupIndicators")]
    pub group_indicators: GroupIndicators,
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
