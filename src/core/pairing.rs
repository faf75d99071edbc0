use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::distance::{haversine_distance, DistanceFn};
use crate::core::MAX_PAIRS_PER_KITCHEN;
use crate::models::{FoodPreference, KitchenAvailability, Location, Pair, Participant};

/// Result of the pairing process
#[derive(Debug, Clone)]
pub struct PairingResult {
    pub pairs: Vec<Pair>,
    /// Participants left without a pair, in registration order
    pub successors: Vec<Participant>,
}

/// Turns registered participants into cooking pairs
///
/// # Pipeline Stages
/// 1. Joint registrations
/// 2. Same-preference pairing of kitchen owners with kitchenless participants
/// 3. Remainder pairing by age, then kitchen owners among themselves
/// 4. Kitchen occupation filter
#[derive(Debug, Clone)]
pub struct PairingEngine {
    max_pairs_per_kitchen: usize,
    distance: DistanceFn,
}

impl PairingEngine {
    pub fn new(max_pairs_per_kitchen: usize) -> Self {
        Self {
            max_pairs_per_kitchen,
            distance: haversine_distance,
        }
    }

    /// Replace the distance function used to pick the nearer kitchen
    pub fn with_distance(mut self, distance: DistanceFn) -> Self {
        self.distance = distance;
        self
    }

    /// Pair up participants for the event held at `party`
    pub fn generate_pairs(&self, participants: &[Participant], party: &Location) -> PairingResult {
        let mut run = PairingRun {
            pool: participants.to_vec(),
            pairs: Vec::new(),
            successors: Vec::new(),
            next_pair_number: 1,
        };

        run.pair_joint_registrations();
        tracing::debug!("Joint registrations produced {} pairs", run.pairs.len());

        run.pair_by_preference();
        tracing::debug!("Preference buckets raised total to {} pairs", run.pairs.len());

        run.pair_remainder(party, self.distance);
        tracing::debug!("Remainder pairing raised total to {} pairs", run.pairs.len());

        let PairingRun {
            pool,
            pairs,
            mut successors,
            ..
        } = run;
        successors.extend(pool);

        let pairs = self.filter_kitchen_occupation(pairs, &mut successors);

        tracing::info!(
            "Pairing finished: {} pairs, {} successor participants",
            pairs.len(),
            successors.len()
        );

        PairingResult { pairs, successors }
    }

    /// Drop every pair whose kitchen is shared by too many pairs
    fn filter_kitchen_occupation(&self, pairs: Vec<Pair>, successors: &mut Vec<Participant>) -> Vec<Pair> {
        let mut occupation: HashMap<(u64, u64), usize> = HashMap::new();
        for pair in &pairs {
            *occupation.entry(pair.kitchen.key()).or_default() += 1;
        }

        let (kept, crowded): (Vec<Pair>, Vec<Pair>) = pairs
            .into_iter()
            .partition(|pair| occupation[&pair.kitchen.key()] <= self.max_pairs_per_kitchen);

        if !crowded.is_empty() {
            tracing::info!(
                "Removed {} pairs from overcrowded kitchens (limit {})",
                crowded.len(),
                self.max_pairs_per_kitchen
            );
        }

        for pair in crowded {
            successors.push(pair.participant1);
            successors.push(pair.participant2);
        }

        kept
    }
}

impl Default for PairingEngine {
    fn default() -> Self {
        Self::new(MAX_PAIRS_PER_KITCHEN)
    }
}

/// Mutable state of a single pairing run
struct PairingRun {
    pool: Vec<Participant>,
    pairs: Vec<Pair>,
    successors: Vec<Participant>,
    next_pair_number: u32,
}

impl PairingRun {
    fn pair_joint_registrations(&mut self) {
        let mut taken: HashSet<String> = HashSet::new();

        for index in 0..self.pool.len() {
            let declaring = &self.pool[index];
            if taken.contains(&declaring.id) {
                continue;
            }
            let Some(partner_id) = declaring.partner_id.as_ref() else {
                continue;
            };

            let partner = self
                .pool
                .iter()
                .position(|p| &p.id == partner_id && p.id != declaring.id && !taken.contains(&p.id));
            let Some(partner) = partner else {
                tracing::warn!(
                    "Partner {} of participant {} is not available, pairing individually",
                    partner_id,
                    declaring.id
                );
                continue;
            };

            let p1 = self.pool[index].clone();
            let p2 = self.pool[partner].clone();
            taken.insert(p1.id.clone());
            taken.insert(p2.id.clone());

            let kitchen_supplier = match (p1.kitchen.is_some(), p2.kitchen.is_some()) {
                (true, _) => false,
                (false, true) => true,
                (false, false) => {
                    tracing::warn!(
                        "Joint registration {} / {} has no kitchen, moving both to successors",
                        p1.id,
                        p2.id
                    );
                    self.successors.push(p1);
                    self.successors.push(p2);
                    continue;
                }
            };

            if FoodPreference::resolve_pair(p1.food_preference, p2.food_preference).is_none() {
                tracing::warn!(
                    "Joint registration {} / {} mixes meat with veggie or vegan, moving both to successors",
                    p1.id,
                    p2.id
                );
                self.successors.push(p1);
                self.successors.push(p2);
                continue;
            }

            let preference = p1.food_preference;
            self.create_pair(p1, p2, preference, kitchen_supplier, true);
        }

        self.pool.retain(|p| !taken.contains(&p.id));
    }

    fn pair_by_preference(&mut self) {
        let mut sorted: Vec<usize> = (0..self.pool.len()).collect();
        sorted.sort_by_key(|&i| {
            let p = &self.pool[i];
            (p.food_preference, p.has_kitchen, p.age)
        });

        let mut taken = vec![false; self.pool.len()];

        for preference in FoodPreference::ALL {
            let bucket = sorted
                .iter()
                .copied()
                .filter(|&i| self.pool[i].food_preference == preference);

            let (without_kitchen, with_kitchen): (Vec<usize>, Vec<usize>) =
                bucket.partition(|&i| self.pool[i].has_kitchen == KitchenAvailability::No);

            for (&cook, &host) in without_kitchen.iter().zip(with_kitchen.iter()) {
                taken[cook] = true;
                taken[host] = true;
                let p1 = self.pool[cook].clone();
                let p2 = self.pool[host].clone();
                self.create_pair(p1, p2, preference, true, false);
            }
        }

        let mut index = 0;
        self.pool.retain(|_| {
            let keep = !taken[index];
            index += 1;
            keep
        });
    }

    fn pair_remainder(&mut self, party: &Location, distance: DistanceFn) {
        let mut by_age: Vec<Participant> = self.pool.clone();
        by_age.sort_by_key(|p| p.age);

        let (mut without_kitchen, mut with_kitchen): (VecDeque<Participant>, VecDeque<Participant>) = by_age
            .into_iter()
            .partition(|p| p.has_kitchen == KitchenAvailability::No);

        let mut taken: HashSet<String> = HashSet::new();

        // Rotating both queues in lockstep repeats after lcm(a, b) attempts,
        // so that many failures in a row means no pair can be formed.
        let mut stalled = 0;
        while !without_kitchen.is_empty() && !with_kitchen.is_empty() {
            if stalled >= lcm(without_kitchen.len(), with_kitchen.len()) {
                break;
            }
            let (Some(cook), Some(host)) = (without_kitchen.pop_front(), with_kitchen.pop_front()) else {
                break;
            };

            match FoodPreference::resolve_pair(cook.food_preference, host.food_preference) {
                Some(preference) => {
                    taken.insert(cook.id.clone());
                    taken.insert(host.id.clone());
                    self.create_pair(cook, host, preference, true, false);
                    stalled = 0;
                }
                None => {
                    without_kitchen.push_back(cook);
                    with_kitchen.push_back(host);
                    stalled += 1;
                }
            }
        }

        while with_kitchen.len() >= 2 {
            let (Some(first), Some(second)) = (with_kitchen.pop_front(), with_kitchen.pop_front()) else {
                break;
            };

            let Some(preference) = FoodPreference::resolve_pair(first.food_preference, second.food_preference)
            else {
                tracing::debug!(
                    "Kitchen owners {} and {} are incompatible, leaving both unpaired",
                    first.id,
                    second.id
                );
                continue;
            };

            let first_distance = kitchen_distance(&first, party, distance);
            let second_distance = kitchen_distance(&second, party, distance);
            let kitchen_supplier = first_distance > second_distance;

            taken.insert(first.id.clone());
            taken.insert(second.id.clone());
            self.create_pair(first, second, preference, kitchen_supplier, false);
        }

        self.pool.retain(|p| !taken.contains(&p.id));
    }

    /// Append a pair, or route both participants to the successors when
    /// the supplying side has no kitchen.
    fn create_pair(
        &mut self,
        participant1: Participant,
        participant2: Participant,
        preference: FoodPreference,
        kitchen_supplier: bool,
        joint_registration: bool,
    ) {
        let host = if kitchen_supplier { &participant2 } else { &participant1 };
        let Some(kitchen) = host.kitchen_location() else {
            tracing::warn!(
                "Participant {} was chosen to supply a kitchen but has none",
                host.id
            );
            self.successors.push(participant1);
            self.successors.push(participant2);
            return;
        };

        let pair_number = self.next_pair_number;
        self.next_pair_number += 1;

        self.pairs.push(Pair {
            pair_number,
            participant1,
            participant2,
            main_food_preference: preference,
            kitchen_supplier,
            kitchen,
            joint_registration,
            successor: false,
        });
    }
}

fn kitchen_distance(participant: &Participant, party: &Location, distance: DistanceFn) -> f64 {
    participant
        .kitchen_location()
        .map(|kitchen| distance(&kitchen, party))
        .unwrap_or(f64::INFINITY)
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: usize, b: usize) -> usize {
    if a == 0 || b == 0 {
        0
    } else {
        a / gcd(a, b) * b
    }
}
