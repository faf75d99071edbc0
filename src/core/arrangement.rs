//! Course rotations for a single cohort.
//!
//! A cohort of `k * k` pairs is laid out on the `k x k` grid of the affine
//! plane over `Z_k` (`k` prime). Each parallel class of lines in that plane
//! splits the cohort into `k` disjoint groups of `k` pairs, and two distinct
//! pairs lie on exactly one common line. Taking the first three classes as
//! the courses therefore never seats two pairs together twice, and the fourth
//! class meets every course-group in exactly one pair.

use std::collections::HashMap;

use crate::core::{PlanError, GROUP_SIZE};
use crate::models::PairId;

/// One split of a cohort into disjoint course-groups
pub type Partition = Vec<[PairId; GROUP_SIZE]>;

/// Generate `count` partitions of `cohort` into groups of [`GROUP_SIZE`]
///
/// Pairs are placed on the grid in cohort order, so pairs adjacent in the
/// cohort share the first partition.
///
/// # Errors
/// `PlanError::Structural` when the cohort is not `GROUP_SIZE²` pairs or
/// more than `GROUP_SIZE + 1` partitions are requested.
pub fn generate_arrangements(cohort: &[PairId], count: usize) -> Result<Vec<Partition>, PlanError> {
    let k = GROUP_SIZE;

    if cohort.len() != k * k {
        return Err(PlanError::Structural(format!(
            "cohort has {} pairs, expected {}",
            cohort.len(),
            k * k
        )));
    }
    if count > k + 1 {
        return Err(PlanError::Structural(format!(
            "{} arrangements requested, at most {} are conflict free",
            count,
            k + 1
        )));
    }

    let point = |x: usize, y: usize| cohort[x * k + y];

    let partitions = (0..count)
        .map(|class| {
            (0..k)
                .map(|line| {
                    let mut group = [PairId(0); GROUP_SIZE];
                    for (t, slot) in group.iter_mut().enumerate() {
                        *slot = match class {
                            0 => point(line, t),
                            _ => point(t, ((class - 1) * t + line) % k),
                        };
                    }
                    group
                })
                .collect()
        })
        .collect();

    Ok(partitions)
}

/// Count how often two pairs share a group more than once across `partitions`
pub fn repeat_encounters(partitions: &[Partition]) -> usize {
    let mut encounters: HashMap<(PairId, PairId), usize> = HashMap::new();

    for group in partitions.iter().flatten() {
        for (i, &a) in group.iter().enumerate() {
            for &b in &group[i + 1..] {
                let key = if a < b { (a, b) } else { (b, a) };
                *encounters.entry(key).or_default() += 1;
            }
        }
    }

    encounters.values().map(|&n| n.saturating_sub(1)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cohort() -> Vec<PairId> {
        (10..19).map(PairId).collect()
    }

    #[test]
    fn test_partitions_cover_cohort() {
        let partitions = generate_arrangements(&cohort(), 4).unwrap();
        assert_eq!(partitions.len(), 4);

        for partition in &partitions {
            assert_eq!(partition.len(), 3);
            let members: HashSet<PairId> = partition.iter().flatten().copied().collect();
            assert_eq!(members.len(), 9);
        }
    }

    #[test]
    fn test_no_pair_meets_twice() {
        let partitions = generate_arrangements(&cohort(), 4).unwrap();
        assert_eq!(repeat_encounters(&partitions), 0);

        // every pair meets six different pairs over the three courses
        for id in cohort() {
            let met: HashSet<PairId> = partitions[..3]
                .iter()
                .flatten()
                .filter(|g| g.contains(&id))
                .flat_map(|g| g.iter().copied())
                .filter(|&other| other != id)
                .collect();
            assert_eq!(met.len(), 6);
        }
    }

    #[test]
    fn test_last_partition_meets_every_group_once() {
        let partitions = generate_arrangements(&cohort(), 4).unwrap();

        for host_line in &partitions[3] {
            for course in &partitions[..3] {
                for group in course {
                    let shared = group.iter().filter(|id| host_line.contains(id)).count();
                    assert_eq!(shared, 1);
                }
            }
        }
    }

    #[test]
    fn test_first_partition_keeps_cohort_order() {
        let partitions = generate_arrangements(&cohort(), 1).unwrap();
        assert_eq!(partitions[0][0], [PairId(10), PairId(11), PairId(12)]);
        assert_eq!(partitions[0][2], [PairId(16), PairId(17), PairId(18)]);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(generate_arrangements(&cohort()[..8], 4).is_err());
        assert!(generate_arrangements(&cohort(), 5).is_err());
    }

    #[test]
    fn test_repeat_encounters_counts_duplicates() {
        let group = [PairId(0), PairId(1), PairId(2)];
        let partitions = vec![vec![group], vec![group]];
        assert_eq!(repeat_encounters(&partitions), 3);
    }
}
