use rand::Rng;

use crate::core::arrangement::generate_arrangements;
use crate::core::course_assignment::assign_courses;
use crate::core::distance::{haversine_distance, DistanceFn};
use crate::core::{PlanError, ARRANGEMENT_COUNT, CLUSTER_SIZE};
use crate::models::{Course, DiningHistory, FoodPreference, Group, GroupPlan, Location, Pair, PairId};

/// Clusters pairs into cohorts and schedules their course-groups
///
/// # Pipeline Stages
/// 1. Bucket pairs by main preference, each bucket sorted by age difference
/// 2. Balance bucket sizes to multiples of the cohort size
/// 3. Split buckets into cohorts
/// 4. Generate course rotations and hosts per cohort
#[derive(Debug, Clone)]
pub struct GroupFormationEngine {
    distance: DistanceFn,
}

impl GroupFormationEngine {
    pub fn new() -> Self {
        Self {
            distance: haversine_distance,
        }
    }

    /// Replace the distance function used for host selection
    pub fn with_distance(mut self, distance: DistanceFn) -> Self {
        self.distance = distance;
        self
    }

    /// Form course-groups out of `pairs`
    ///
    /// `rng` drives the random balancing moves; pass a seeded generator for
    /// reproducible plans.
    pub fn generate_groups<R: Rng>(
        &self,
        pairs: Vec<Pair>,
        party: &Location,
        rng: &mut R,
    ) -> Result<GroupPlan, PlanError> {
        let mut arena = pairs;

        let mut plant_based = bucket(&arena, |p| p.is_plant_based());
        let mut meat = bucket(&arena, |p| p == FoodPreference::Meat);
        let mut any = bucket(&arena, |p| p == FoodPreference::None);

        tracing::debug!(
            "Buckets before balancing: plant-based={}, meat={}, any={}",
            plant_based.len(),
            meat.len(),
            any.len()
        );

        let mut successors = Vec::new();
        pad_bucket(&mut plant_based, &mut any, &mut successors, rng);
        pad_bucket(&mut meat, &mut any, &mut successors, rng);
        shrink_bucket(&mut any, &mut successors, rng);

        for id in &successors {
            arena[id.0].successor = true;
        }

        let mut schedule = Schedule::default();
        let mut cohort_index = 0;

        for ids in [&plant_based, &meat, &any] {
            for cohort in split_into_cohorts(ids)? {
                self.schedule_cohort(&arena, cohort, cohort_index, party, &mut schedule)?;
                cohort_index += 1;
            }
        }

        let Schedule { groups, history, .. } = schedule;
        let groups: Vec<Group> = groups.into_iter().flatten().collect();

        tracing::info!(
            "Group formation finished: {} cohorts, {} groups, {} successor pairs",
            cohort_index,
            groups.len(),
            successors.len()
        );

        Ok(GroupPlan {
            pairs: arena,
            groups,
            successors,
            history,
        })
    }

    fn schedule_cohort(
        &self,
        arena: &[Pair],
        cohort: &[PairId],
        cohort_index: usize,
        party: &Location,
        schedule: &mut Schedule,
    ) -> Result<(), PlanError> {
        let partitions = generate_arrangements(cohort, ARRANGEMENT_COUNT)?;
        let (courses, rest) = partitions.split_at(Course::ALL.len());
        let host_partition = rest
            .first()
            .ok_or_else(|| PlanError::Structural("missing host partition".to_string()))?;

        let assignment = assign_courses(arena, courses, host_partition, party, self.distance)?;

        for course in Course::ALL {
            let c = course.index();
            for (g, members) in courses[c].iter().enumerate() {
                let preferences: Vec<FoodPreference> = members
                    .iter()
                    .map(|id| arena[id.0].main_food_preference)
                    .collect();
                let host = assignment.host(course, g);

                schedule.counters[c] += 1;
                schedule.history.record(course, members);
                schedule.groups[c].push(Group {
                    members: *members,
                    food_preference: FoodPreference::resolve_group(&preferences),
                    course,
                    number: schedule.counters[c],
                    host,
                    kitchen: arena[host.0].kitchen,
                    cohort: cohort_index,
                });
            }
        }

        tracing::debug!(
            "Scheduled cohort {} ({:.2} km total travel)",
            cohort_index,
            assignment.travel_distance
        );

        Ok(())
    }
}

impl Default for GroupFormationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Groups per course under construction
#[derive(Debug, Default)]
struct Schedule {
    groups: [Vec<Group>; 3],
    counters: [u32; 3],
    history: DiningHistory,
}

/// Ids of matching pairs, stably sorted by ascending age difference
fn bucket(arena: &[Pair], accept: impl Fn(FoodPreference) -> bool) -> Vec<PairId> {
    let mut ids: Vec<PairId> = arena
        .iter()
        .enumerate()
        .filter(|(_, pair)| accept(pair.main_food_preference))
        .map(|(i, _)| PairId(i))
        .collect();
    ids.sort_by_key(|id| arena[id.0].age_difference());
    ids
}

/// Fill `bucket` up to a multiple of the cohort size with random donors
///
/// When the donors run out the bucket is shrunk instead.
fn pad_bucket<R: Rng>(
    bucket: &mut Vec<PairId>,
    donors: &mut Vec<PairId>,
    successors: &mut Vec<PairId>,
    rng: &mut R,
) {
    while bucket.len() % CLUSTER_SIZE != 0 {
        if donors.is_empty() {
            tracing::warn!(
                "Not enough flexible pairs to fill a cohort, dropping {} pairs",
                bucket.len() % CLUSTER_SIZE
            );
            shrink_bucket(bucket, successors, rng);
            return;
        }
        let pick = rng.random_range(0..donors.len());
        bucket.push(donors.remove(pick));
    }
}

/// Move random pairs out of `bucket` until it is a multiple of the cohort size
fn shrink_bucket<R: Rng>(bucket: &mut Vec<PairId>, successors: &mut Vec<PairId>, rng: &mut R) {
    while bucket.len() % CLUSTER_SIZE != 0 {
        let pick = rng.random_range(0..bucket.len());
        successors.push(bucket.remove(pick));
    }
}

fn split_into_cohorts(bucket: &[PairId]) -> Result<Vec<&[PairId]>, PlanError> {
    if bucket.len() % CLUSTER_SIZE != 0 {
        return Err(PlanError::Structural(format!(
            "bucket of {} pairs is not a multiple of {}",
            bucket.len(),
            CLUSTER_SIZE
        )));
    }
    Ok(bucket.chunks_exact(CLUSTER_SIZE).collect())
}
