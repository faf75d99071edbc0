use std::collections::HashSet;

use crate::core::PlanError;
use crate::models::{FoodPreference, GroupPlan, Pair};

/// Re-check the pair invariants the pairing engine guarantees
///
/// Fails on the first pair that seats a meat eater with a vegan or
/// vegetarian, or that has no kitchen on either side.
pub fn validate_pairs(pairs: &[Pair]) -> Result<(), PlanError> {
    for pair in pairs {
        let first = pair.participant1.food_preference;
        let second = pair.participant2.food_preference;
        let mixed = (first == FoodPreference::Meat && second.is_plant_based())
            || (second == FoodPreference::Meat && first.is_plant_based());
        if mixed {
            return Err(PlanError::IncompatiblePreferences {
                pair_number: pair.pair_number,
            });
        }
    }

    for pair in pairs {
        if pair.participant1.kitchen.is_none() && pair.participant2.kitchen.is_none() {
            return Err(PlanError::MissingKitchen {
                pair_number: pair.pair_number,
            });
        }
    }

    Ok(())
}

/// Check the shape of a group plan
///
/// Every group needs three distinct pairs of the arena and a host among
/// them, and no successor may be seated.
pub fn validate_groups(plan: &GroupPlan) -> Result<(), PlanError> {
    let successors: HashSet<_> = plan.successors.iter().collect();

    for group in &plan.groups {
        let distinct: HashSet<_> = group.members.iter().collect();
        if distinct.len() != group.members.len() {
            return Err(PlanError::Structural(format!(
                "{} group {} seats a pair twice",
                group.course, group.number
            )));
        }
        if group.members.iter().any(|id| id.0 >= plan.pairs.len()) {
            return Err(PlanError::Structural(format!(
                "{} group {} references an unknown pair",
                group.course, group.number
            )));
        }
        if !group.contains(group.host) {
            return Err(PlanError::Structural(format!(
                "{} group {} is hosted by a non-member",
                group.course, group.number
            )));
        }
        if group.members.iter().any(|id| successors.contains(id)) {
            return Err(PlanError::Structural(format!(
                "{} group {} seats a successor pair",
                group.course, group.number
            )));
        }
    }

    Ok(())
}
