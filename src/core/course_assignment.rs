use std::collections::HashMap;

use crate::core::arrangement::Partition;
use crate::core::distance::{route_length, DistanceFn};
use crate::core::{PlanError, GROUP_SIZE};
use crate::models::{Course, Location, Pair, PairId};

/// Host lines mapped to (appetizer, main, dessert), in the order they are tried
const LINE_ORDERS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Hosts chosen for one cohort
#[derive(Debug, Clone, PartialEq)]
pub struct HostAssignment {
    /// Host of each course-group, indexed like the course partitions
    pub hosts: Vec<Vec<PairId>>,
    /// Index into the host partition of the line cooking each course
    pub line_for_course: [usize; 3],
    /// Summed travel of every pair in the cohort
    pub travel_distance: f64,
}

impl HostAssignment {
    #[inline]
    pub fn host(&self, course: Course, group: usize) -> PairId {
        self.hosts[course.index()][group]
    }
}

/// Choose which pair hosts each course-group of a cohort
///
/// Every line of `host_partition` cooks one course, so each pair of the
/// cohort hosts exactly once. All six line-to-course mappings are scored by
/// the total distance the cohort's pairs travel (appetizer kitchen, main
/// kitchen, dessert kitchen, then the party) and the cheapest one is kept;
/// ties go to the mapping tried first.
///
/// # Arguments
/// * `pairs` - Pair arena the ids index into
/// * `courses` - One partition per course, in [`Course::ALL`] order
/// * `host_partition` - Partition orthogonal to all course partitions
/// * `party` - Party location every route ends at
/// * `distance` - Distance function
pub fn assign_courses(
    pairs: &[Pair],
    courses: &[Partition],
    host_partition: &Partition,
    party: &Location,
    distance: DistanceFn,
) -> Result<HostAssignment, PlanError> {
    if courses.len() != Course::ALL.len() || host_partition.len() != GROUP_SIZE {
        return Err(PlanError::Structural(format!(
            "course assignment needs {} course partitions and {} host lines, got {} and {}",
            Course::ALL.len(),
            GROUP_SIZE,
            courses.len(),
            host_partition.len()
        )));
    }

    // group index of every pair, per course
    let seating: Vec<HashMap<PairId, usize>> = courses
        .iter()
        .map(|partition| {
            partition
                .iter()
                .enumerate()
                .flat_map(|(g, group)| group.iter().map(move |&id| (id, g)))
                .collect()
        })
        .collect();

    let mut best: Option<HostAssignment> = None;

    for order in LINE_ORDERS {
        let hosts = courses
            .iter()
            .zip(order)
            .map(|(partition, line)| {
                partition
                    .iter()
                    .map(|group| host_in_line(group, &host_partition[line]))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let travel_distance: f64 = courses[0]
            .iter()
            .flatten()
            .map(|id| {
                let mut stops: Vec<Location> = seating
                    .iter()
                    .zip(&hosts)
                    .map(|(seats, course_hosts)| pairs[course_hosts[seats[id]].0].kitchen)
                    .collect();
                stops.push(*party);
                route_length(&stops, distance)
            })
            .sum();

        let better = best
            .as_ref()
            .map_or(true, |current| travel_distance < current.travel_distance);
        if better {
            best = Some(HostAssignment {
                hosts,
                line_for_course: order,
                travel_distance,
            });
        }
    }

    best.ok_or_else(|| PlanError::Structural("no host mapping evaluated".to_string()))
}

/// The single member of `group` that lies on `line`
fn host_in_line(group: &[PairId; GROUP_SIZE], line: &[PairId; GROUP_SIZE]) -> Result<PairId, PlanError> {
    let mut on_line = group.iter().filter(|id| line.contains(id));
    match (on_line.next(), on_line.next()) {
        (Some(&host), None) => Ok(host),
        _ => Err(PlanError::Structural(format!(
            "group {:?} does not meet host line {:?} in exactly one pair",
            group, line
        ))),
    }
}
