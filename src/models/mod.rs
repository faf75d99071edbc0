// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Course, DiningHistory, FoodPreference, Gender, Group, GroupPlan, Kitchen, KitchenAvailability,
    Location, Pair, PairId, Participant,
};
pub use requests::PlanRequest;
pub use responses::{ErrorResponse, HealthResponse, PlanResponse};
