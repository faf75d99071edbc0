use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Location, Participant};

/// Request to plan one event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlanRequest {
    #[validate(length(min = 2))]
    pub participants: Vec<Participant>,
    #[serde(alias = "party_location", rename = "partyLocation")]
    pub party_location: Location,
    /// Seed for the balancing step; falls back to the configured seed
    #[serde(default)]
    pub seed: Option<u64>,
}
