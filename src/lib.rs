//! Spinfood Algo - pairing and dinner-group planning for rotating-dinner events
//!
//! This library turns registered participants into cooking pairs and
//! schedules those pairs into course-groups that rotate through appetizer,
//! main course and dessert at different kitchens.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{GroupFormationEngine, PairingEngine, PlanError, Planner, distance::haversine_distance};
pub use crate::models::{Course, FoodPreference, Group, GroupPlan, Location, Pair, Participant, PlanRequest, PlanResponse};
