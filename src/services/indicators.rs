use serde::{Deserialize, Serialize};

use crate::core::distance::{route_length, DistanceFn};
use crate::models::{Course, GroupPlan, Location, Pair, PairId, Participant};

/// Descriptive statistics over the pairing result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairIndicators {
    pub pair_count: usize,
    pub successor_count: usize,
    /// Mean distance of the share of women per pair from 0.5
    pub gender_deviation: f64,
    pub average_age_difference: f64,
    pub average_preference_deviation: f64,
}

impl PairIndicators {
    pub fn calculate(pairs: &[Pair], successors: &[Participant]) -> Self {
        if pairs.is_empty() {
            return Self {
                successor_count: successors.len(),
                ..Self::default()
            };
        }

        let count = pairs.len() as f64;
        let gender_deviation = pairs
            .iter()
            .map(|p| (p.number_of_women() as f64 / 2.0 - 0.5).abs())
            .sum::<f64>()
            / count;
        let average_age_difference = pairs.iter().map(|p| p.age_difference() as f64).sum::<f64>() / count;
        let average_preference_deviation =
            pairs.iter().map(|p| p.preference_deviation() as f64).sum::<f64>() / count;

        Self {
            pair_count: pairs.len(),
            successor_count: successors.len(),
            gender_deviation,
            average_age_difference,
            average_preference_deviation,
        }
    }
}

/// Descriptive statistics over the group plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupIndicators {
    pub group_count: usize,
    pub successor_pair_count: usize,
    pub gender_deviation: f64,
    pub average_age_difference: f64,
    pub average_preference_deviation: f64,
    pub total_path_length: f64,
    pub average_path_length: f64,
    pub path_length_std_dev: f64,
}

impl GroupIndicators {
    /// Path lengths follow each scheduled pair from the appetizer kitchen
    /// through the main and dessert kitchens to the party.
    pub fn calculate(plan: &GroupPlan, party: &Location, distance: DistanceFn) -> Self {
        let successor_pair_count = plan.successors.len();
        if plan.groups.is_empty() {
            return Self {
                successor_pair_count,
                ..Self::default()
            };
        }

        let count = plan.groups.len() as f64;
        let mut gender_deviation = 0.0;
        let mut age_difference = 0.0;
        let mut preference_deviation = 0.0;

        for group in &plan.groups {
            let members: Vec<&Pair> = group.members.iter().map(|&id| plan.pair(id)).collect();

            let women: usize = members.iter().map(|p| p.number_of_women()).sum();
            gender_deviation += (women as f64 / (members.len() * 2) as f64 - 0.5).abs();

            let ages = members.iter().map(|p| p.mean_age());
            let oldest = ages.clone().fold(f64::MIN, f64::max);
            let youngest = ages.fold(f64::MAX, f64::min);
            age_difference += oldest - youngest;

            let ranks = members.iter().map(|p| p.main_food_preference.rank());
            let highest = ranks.clone().max().unwrap_or(0);
            let lowest = ranks.min().unwrap_or(0);
            preference_deviation += (highest - lowest) as f64;
        }

        let paths = path_lengths(plan, party, distance);
        let total_path_length: f64 = paths.iter().sum();
        let (average_path_length, path_length_std_dev) = if paths.is_empty() {
            (0.0, 0.0)
        } else {
            let n = paths.len() as f64;
            let mean = total_path_length / n;
            let variance = paths.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n;
            (mean, variance.sqrt())
        };

        Self {
            group_count: plan.groups.len(),
            successor_pair_count,
            gender_deviation: gender_deviation / count,
            average_age_difference: age_difference / count,
            average_preference_deviation: preference_deviation / count,
            total_path_length,
            average_path_length,
            path_length_std_dev,
        }
    }
}

/// Route length of every pair seated for all three courses
fn path_lengths(plan: &GroupPlan, party: &Location, distance: DistanceFn) -> Vec<f64> {
    (0..plan.pairs.len())
        .map(PairId)
        .filter_map(|id| {
            let mut stops = Course::ALL
                .iter()
                .map(|&course| plan.group_of(id, course).map(|g| g.kitchen))
                .collect::<Option<Vec<Location>>>()?;
            stops.push(*party);
            Some(route_length(&stops, distance))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::haversine_distance;
    use crate::models::{FoodPreference, Gender, Group, KitchenAvailability};

    fn participant(gender: Gender, age: u8, preference: FoodPreference) -> Participant {
        Participant {
            id: format!("{:?}-{}", gender, age),
            name: "Test".to_string(),
            age,
            gender,
            food_preference: preference,
            has_kitchen: KitchenAvailability::No,
            kitchen: None,
            partner_id: None,
        }
    }

    fn pair(p1: Participant, p2: Participant) -> Pair {
        Pair {
            pair_number: 1,
            participant1: p1,
            participant2: p2,
            main_food_preference: FoodPreference::Vegan,
            kitchen_supplier: false,
            kitchen: Location::new(50.0, 8.0),
            joint_registration: false,
            successor: false,
        }
    }

    #[test]
    fn test_pair_indicators() {
        let pairs = vec![
            pair(
                participant(Gender::Female, 20, FoodPreference::Vegan),
                participant(Gender::Male, 30, FoodPreference::None),
            ),
            pair(
                participant(Gender::Female, 25, FoodPreference::Veggie),
                participant(Gender::Female, 25, FoodPreference::Vegan),
            ),
        ];

        let indicators = PairIndicators::calculate(&pairs, &[]);

        assert_eq!(indicators.pair_count, 2);
        assert_eq!(indicators.successor_count, 0);
        assert!((indicators.gender_deviation - 0.25).abs() < 1e-9);
        assert!((indicators.average_age_difference - 5.0).abs() < 1e-9);
        assert!((indicators.average_preference_deviation - 1.5).abs() < 1e-9);
    }

    fn flat_distance(a: &Location, b: &Location) -> f64 {
        (a.latitude - b.latitude).abs() + (a.longitude - b.longitude).abs()
    }

    /// Nine pairs, pair i cooks at (i, 0) and has mean age 20 + i.
    /// Pairs 0..3 are two women and vegan, the rest mixed and veggie.
    fn cohort_plan() -> GroupPlan {
        let pairs: Vec<Pair> = (0..9u8)
            .map(|i| {
                let second = if i < 3 { Gender::Female } else { Gender::Male };
                let preference = if i < 3 { FoodPreference::Vegan } else { FoodPreference::Veggie };
                Pair {
                    pair_number: i as u32 + 1,
                    main_food_preference: preference,
                    kitchen: Location::new(i as f64, 0.0),
                    ..pair(
                        participant(Gender::Female, 20 + i, preference),
                        participant(second, 20 + i, preference),
                    )
                }
            })
            .collect();

        let layout: [(Course, [[usize; 3]; 3], usize); 3] = [
            (Course::Appetizer, [[0, 1, 2], [3, 4, 5], [6, 7, 8]], 0),
            (Course::Main, [[0, 3, 6], [1, 4, 7], [2, 5, 8]], 1),
            (Course::Dessert, [[0, 4, 8], [1, 5, 6], [2, 3, 7]], 2),
        ];
        let mut groups = Vec::new();
        for (course, lines, host_slot) in layout {
            for (n, line) in lines.into_iter().enumerate() {
                let host = PairId(line[host_slot]);
                groups.push(Group {
                    members: line.map(PairId),
                    food_preference: None,
                    course,
                    number: n as u32 + 1,
                    host,
                    kitchen: pairs[host.0].kitchen,
                    cohort: 0,
                });
            }
        }

        GroupPlan {
            pairs,
            groups,
            successors: vec![],
            history: Default::default(),
        }
    }

    #[test]
    fn test_group_indicators() {
        let plan = cohort_plan();
        let indicators = GroupIndicators::calculate(&plan, &Location::new(0.0, 0.0), flat_distance);

        assert_eq!(indicators.group_count, 9);
        assert_eq!(indicators.successor_pair_count, 0);
        // 0.5 for the all-women appetizer group, 1/6 for each of six mixed groups
        assert!((indicators.gender_deviation - 1.5 / 9.0).abs() < 1e-9);
        assert!((indicators.average_age_difference - 42.0 / 9.0).abs() < 1e-9);
        assert!((indicators.average_preference_deviation - 6.0 / 9.0).abs() < 1e-9);

        // routes: 16, 12, 14, 11, 13, 9, 12, 12, 12
        assert!((indicators.total_path_length - 111.0).abs() < 1e-9);
        assert!((indicators.average_path_length - 111.0 / 9.0).abs() < 1e-9);
        assert!((indicators.path_length_std_dev - (10.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_path_lengths_skip_unseated_pairs() {
        let mut plan = cohort_plan();
        plan.pairs.push(pair(
            participant(Gender::Male, 40, FoodPreference::Meat),
            participant(Gender::Male, 40, FoodPreference::Meat),
        ));
        plan.successors.push(PairId(9));

        let paths = path_lengths(&plan, &Location::new(0.0, 0.0), flat_distance);
        assert_eq!(paths.len(), 9);
        assert_eq!(paths[0], 16.0);
        assert_eq!(paths[5], 9.0);
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        let indicators = PairIndicators::calculate(&[], &[]);
        assert_eq!(indicators, PairIndicators::default());

        let plan = GroupPlan {
            pairs: vec![],
            groups: vec![],
            successors: vec![],
            history: Default::default(),
        };
        let indicators = GroupIndicators::calculate(&plan, &Location::new(50.0, 8.0), haversine_distance);
        assert_eq!(indicators, GroupIndicators::default());
    }
}
