use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::distance::{haversine_distance, DistanceFn};
use crate::core::{GroupFormationEngine, PairingEngine, PairingResult, PlanError, MAX_PAIRS_PER_KITCHEN};
use crate::models::{GroupPlan, Location, Participant};
use crate::services::indicators::{GroupIndicators, PairIndicators};
use crate::services::validator::{validate_groups, validate_pairs};

/// Everything produced for one event
#[derive(Debug, Clone)]
pub struct Plan {
    pub pairing: PairingResult,
    pub groups: GroupPlan,
    pub pair_indicators: PairIndicators,
    pub group_indicators: GroupIndicators,
}

/// Runs pairing, validation, group formation and statistics in one pass
#[derive(Debug, Clone)]
pub struct Planner {
    pairing: PairingEngine,
    grouping: GroupFormationEngine,
    distance: DistanceFn,
    default_seed: Option<u64>,
}

impl Planner {
    pub fn new(max_pairs_per_kitchen: usize, default_seed: Option<u64>) -> Self {
        Self {
            pairing: PairingEngine::new(max_pairs_per_kitchen),
            grouping: GroupFormationEngine::new(),
            distance: haversine_distance,
            default_seed,
        }
    }

    /// Replace the distance function of every stage
    pub fn with_distance(mut self, distance: DistanceFn) -> Self {
        self.pairing = self.pairing.with_distance(distance);
        self.grouping = self.grouping.with_distance(distance);
        self.distance = distance;
        self
    }

    /// Plan an event
    ///
    /// `seed` overrides the configured seed; without either the balancing
    /// step is seeded from the operating system.
    pub fn plan(
        &self,
        participants: &[Participant],
        party: &Location,
        seed: Option<u64>,
    ) -> Result<Plan, PlanError> {
        validate_participants(participants)?;

        tracing::info!("Planning event for {} participants", participants.len());

        let pairing = self.pairing.generate_pairs(participants, party);
        validate_pairs(&pairing.pairs)?;

        let mut rng = match seed.or(self.default_seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let groups = self
            .grouping
            .generate_groups(pairing.pairs.clone(), party, &mut rng)?;
        validate_groups(&groups)?;

        let pair_indicators = PairIndicators::calculate(&pairing.pairs, &pairing.successors);
        let group_indicators = GroupIndicators::calculate(&groups, party, self.distance);

        tracing::info!(
            "Plan ready: {} pairs, {} groups, {:.2} km mean path length",
            pair_indicators.pair_count,
            group_indicators.group_count,
            group_indicators.average_path_length
        );

        Ok(Plan {
            pairing,
            groups,
            pair_indicators,
            group_indicators,
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(MAX_PAIRS_PER_KITCHEN, None)
    }
}

fn validate_participants(participants: &[Participant]) -> Result<(), PlanError> {
    let mut seen = HashSet::new();
    for participant in participants {
        participant.validate()?;
        if !seen.insert(participant.id.as_str()) {
            return Err(PlanError::InvalidParticipant {
                id: participant.id.clone(),
                reason: "duplicate participant id".to_string(),
            });
        }
    }
    Ok(())
}
