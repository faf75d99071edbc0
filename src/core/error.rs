use thiserror::Error;

/// Errors raised by the planning pipeline
///
/// Participants or pairs that cannot be placed are not errors; they are
/// reported as successors. These variants mark broken input or a broken
/// invariant, and none of them is retried.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid participant {id}: {reason}")]
    InvalidParticipant { id: String, reason: String },

    #[error("Meat eater with vegan or vegetarian in pair {pair_number}")]
    IncompatiblePreferences { pair_number: u32 },

    #[error("No kitchen available for pair {pair_number}")]
    MissingKitchen { pair_number: u32 },

    #[error("Structural defect: {0}")]
    Structural(String),
}

impl PlanError {
    /// Whether the error was caused by the request rather than the pipeline
    pub fn is_client_error(&self) -> bool {
        matches!(self, PlanError::InvalidParticipant { .. })
    }
}
