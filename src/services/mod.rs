// Collaborators working on the pipeline output
pub mod export;
pub mod indicators;
pub mod validator;

pub use export::{schedule_rows, to_delimited, ScheduleRow};
pub use indicators::{GroupIndicators, PairIndicators};
pub use validator::{validate_groups, validate_pairs};
