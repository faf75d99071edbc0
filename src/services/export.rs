use serde::Serialize;

use crate::models::{Course, FoodPreference, GroupPlan};

/// Column separator of the exported schedule
///
/// Fields are not quoted; participant names containing it are rejected
/// by `Participant::validate`.
pub const DELIMITER: char = ';';

/// One exported line: a pair seated in one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub participant1_name: String,
    pub participant2_name: String,
    pub joint_registration: bool,
    pub kitchen_latitude: f64,
    pub kitchen_longitude: f64,
    pub food_preference: FoodPreference,
    pub pair_number: u32,
    pub appetizer_group: Option<u32>,
    pub main_group: Option<u32>,
    pub dessert_group: Option<u32>,
    pub kitchen_supplier: bool,
    /// Course this pair cooks
    pub cooking_course: Option<Course>,
}

impl ScheduleRow {
    fn fields(&self) -> Vec<String> {
        let opt = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_default();
        vec![
            self.participant1_name.clone(),
            self.participant2_name.clone(),
            self.joint_registration.to_string(),
            self.kitchen_latitude.to_string(),
            self.kitchen_longitude.to_string(),
            self.food_preference.to_string(),
            self.pair_number.to_string(),
            opt(self.appetizer_group),
            opt(self.main_group),
            opt(self.dessert_group),
            self.kitchen_supplier.to_string(),
            self.cooking_course.map(|c| c.to_string()).unwrap_or_default(),
        ]
    }
}

/// Flatten a plan into rows, groups ordered by their food preference
///
/// Groups with an unresolved preference come last; otherwise the plan's
/// group order is kept.
pub fn schedule_rows(plan: &GroupPlan) -> Vec<ScheduleRow> {
    let mut groups: Vec<_> = plan.groups.iter().collect();
    groups.sort_by_key(|g| (g.food_preference.is_none(), g.food_preference));

    groups
        .into_iter()
        .flat_map(|group| group.members.iter().copied())
        .map(|id| {
            let pair = plan.pair(id);
            let group_number = |course| plan.group_of(id, course).map(|g| g.number);
            ScheduleRow {
                participant1_name: pair.participant1.name.clone(),
                participant2_name: pair.participant2.name.clone(),
                joint_registration: pair.joint_registration,
                kitchen_latitude: pair.kitchen.latitude,
                kitchen_longitude: pair.kitchen.longitude,
                food_preference: pair.main_food_preference,
                pair_number: pair.pair_number,
                appetizer_group: group_number(Course::Appetizer),
                main_group: group_number(Course::Main),
                dessert_group: group_number(Course::Dessert),
                kitchen_supplier: pair.kitchen_supplier,
                cooking_course: plan.hosted_course(id),
            }
        })
        .collect()
}

/// Render rows as delimited lines without quoting
pub fn to_delimited(rows: &[ScheduleRow]) -> String {
    let separator = DELIMITER.to_string();
    rows.iter()
        .map(|row| row.fields().join(&separator) + "\n")
        .collect()
}
