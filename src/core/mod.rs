// Core algorithm exports
pub mod arrangement;
pub mod course_assignment;
pub mod distance;
pub mod error;
pub mod grouping;
pub mod pairing;
pub mod planner;

pub use arrangement::{generate_arrangements, repeat_encounters, Partition};
pub use course_assignment::{assign_courses, HostAssignment};
pub use distance::{haversine_distance, route_length, DistanceFn};
pub use error::PlanError;
pub use grouping::GroupFormationEngine;
pub use pairing::{PairingEngine, PairingResult};
pub use planner::{Plan, Planner};

/// Pairs per course-group
pub const GROUP_SIZE: usize = 3;

/// Pairs per cohort: 3 courses with 3 pairs per group
pub const CLUSTER_SIZE: usize = GROUP_SIZE * GROUP_SIZE;

/// Partitions generated per cohort: one per course plus the host rotation
pub const ARRANGEMENT_COUNT: usize = 4;

/// Pairs allowed to cook in the same kitchen
pub const MAX_PAIRS_PER_KITCHEN: usize = 3;
