use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::services::export::DELIMITER;

/// Dietary category of a participant, a pair or a group
///
/// Declaration order is the order in which preference buckets are paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodPreference {
    None,
    Veggie,
    Vegan,
    Meat,
}

impl FoodPreference {
    pub const ALL: [FoodPreference; 4] = [
        FoodPreference::None,
        FoodPreference::Veggie,
        FoodPreference::Vegan,
        FoodPreference::Meat,
    ];

    /// Resolve the main preference of two cooking partners
    ///
    /// Returns `None` when the two preferences cannot share a kitchen
    /// (meat together with veggie or vegan).
    pub fn resolve_pair(a: FoodPreference, b: FoodPreference) -> Option<FoodPreference> {
        use FoodPreference::*;
        match (a, b) {
            (x, y) if x == y => Some(x),
            (None, other) | (other, None) => Some(other),
            (Vegan, Veggie) | (Veggie, Vegan) => Some(Vegan),
            // meat next to veggie or vegan
            _ => Option::None,
        }
    }

    /// Resolve the preference of a course-group from its pairs' main preferences
    pub fn resolve_group(preferences: &[FoodPreference]) -> Option<FoodPreference> {
        let count = |p: FoodPreference| preferences.iter().filter(|&&x| x == p).count();
        let vegan = count(FoodPreference::Vegan);
        let veggie = count(FoodPreference::Veggie);
        let meat = count(FoodPreference::Meat);

        if (vegan > 0 || veggie > 0) && meat > 0 {
            return Option::None;
        }
        if vegan >= 2 {
            return Some(FoodPreference::Vegan);
        }
        if veggie >= 2 {
            return Some(FoodPreference::Veggie);
        }
        if vegan > 0 && veggie > 0 {
            return Some(FoodPreference::Vegan);
        }
        Some(FoodPreference::Meat)
    }

    /// Whether this is one of the vegetarian categories
    #[inline]
    pub fn is_plant_based(self) -> bool {
        matches!(self, FoodPreference::Veggie | FoodPreference::Vegan)
    }

    /// Numeric rank used for preference deviation (none/meat 0, veggie 1, vegan 2)
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            FoodPreference::None | FoodPreference::Meat => 0,
            FoodPreference::Veggie => 1,
            FoodPreference::Vegan => 2,
        }
    }
}

impl fmt::Display for FoodPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FoodPreference::None => "none",
            FoodPreference::Veggie => "veggie",
            FoodPreference::Vegan => "vegan",
            FoodPreference::Meat => "meat",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KitchenAvailability {
    Yes,
    No,
    Maybe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Diverse,
}

/// One of the three dinner courses, in serving order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Course {
    Appetizer,
    Main,
    Dessert,
}

impl Course {
    pub const ALL: [Course; 3] = [Course::Appetizer, Course::Main, Course::Dessert];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Course::Appetizer => 0,
            Course::Main => 1,
            Course::Dessert => 2,
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Course::Appetizer => "appetizer",
            Course::Main => "main",
            Course::Dessert => "dessert",
        };
        f.write_str(s)
    }
}

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Bit-exact key, used to count pairs cooking at the same spot
    #[inline]
    pub(crate) fn key(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kitchen {
    #[serde(flatten)]
    pub location: Location,
    #[serde(default)]
    pub story: Option<i32>,
}

/// A registered participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(rename = "foodPreference")]
    pub food_preference: FoodPreference,
    #[serde(rename = "hasKitchen")]
    pub has_kitchen: KitchenAvailability,
    #[serde(default)]
    pub kitchen: Option<Kitchen>,
    /// Id of the partner this participant registered together with
    #[serde(rename = "partnerId", default)]
    pub partner_id: Option<String>,
}

impl Participant {
    /// Check that kitchen availability and kitchen data agree and that the
    /// name fits into one export column
    pub fn validate(&self) -> Result<(), crate::core::PlanError> {
        let reason = match (self.has_kitchen, &self.kitchen) {
            (KitchenAvailability::Yes | KitchenAvailability::Maybe, None) => {
                Some("kitchen availability declared but no kitchen given")
            }
            (KitchenAvailability::No, Some(_)) => Some("kitchen given but availability is 'no'"),
            _ if self.name.contains(DELIMITER) || self.name.contains('\n') => {
                Some("name contains the export delimiter or a line break")
            }
            _ => None,
        };

        match reason {
            Some(reason) => Err(crate::core::PlanError::InvalidParticipant {
                id: self.id.clone(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn kitchen_location(&self) -> Option<Location> {
        self.kitchen.map(|k| k.location)
    }
}

/// Two participants cooking together in one kitchen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    #[serde(rename = "pairNumber")]
    pub pair_number: u32,
    pub participant1: Participant,
    pub participant2: Participant,
    #[serde(rename = "mainFoodPreference")]
    pub main_food_preference: FoodPreference,
    /// True when participant 2 supplies the kitchen
    #[serde(rename = "kitchenSupplier")]
    pub kitchen_supplier: bool,
    pub kitchen: Location,
    #[serde(rename = "jointRegistration")]
    pub joint_registration: bool,
    pub successor: bool,
}

impl Pair {
    pub fn age_difference(&self) -> u8 {
        self.participant1.age.abs_diff(self.participant2.age)
    }

    pub fn mean_age(&self) -> f64 {
        (self.participant1.age as f64 + self.participant2.age as f64) / 2.0
    }

    /// The participant whose kitchen the pair cooks in
    pub fn kitchen_host(&self) -> &Participant {
        if self.kitchen_supplier {
            &self.participant2
        } else {
            &self.participant1
        }
    }

    pub fn number_of_women(&self) -> usize {
        [&self.participant1, &self.participant2]
            .iter()
            .filter(|p| p.gender == Gender::Female)
            .count()
    }

    pub fn preference_deviation(&self) -> u8 {
        self.participant1
            .food_preference
            .rank()
            .abs_diff(self.participant2.food_preference.rank())
    }

    /// Whether both pairs consist of the same two participants
    pub fn same_participants(&self, other: &Pair) -> bool {
        let (a1, a2) = (&self.participant1.id, &self.participant2.id);
        let (b1, b2) = (&other.participant1.id, &other.participant2.id);
        (a1 == b1 && a2 == b2) || (a1 == b2 && a2 == b1)
    }
}

/// Stable index of a pair inside a [`GroupPlan`]'s pair arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(pub usize);

/// Three pairs dining together for one course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub members: [PairId; 3],
    #[serde(rename = "foodPreference")]
    pub food_preference: Option<FoodPreference>,
    pub course: Course,
    /// Sequence number, counted per course
    pub number: u32,
    pub host: PairId,
    pub kitchen: Location,
    pub cohort: usize,
}

impl Group {
    pub fn contains(&self, id: PairId) -> bool {
        self.members.contains(&id)
    }
}

/// Who dined with whom, per course
///
/// Kept as an adjacency map keyed by [`PairId`] instead of references
/// between pairs and groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiningHistory {
    entries: BTreeMap<PairId, BTreeMap<Course, BTreeSet<PairId>>>,
}

impl DiningHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the given pairs shared a table for `course`
    pub fn record(&mut self, course: Course, members: &[PairId]) {
        for &pair in members {
            let seen = self
                .entries
                .entry(pair)
                .or_default()
                .entry(course)
                .or_default();
            seen.extend(members.iter().copied().filter(|&other| other != pair));
        }
    }

    pub fn co_diners(&self, pair: PairId, course: Course) -> Option<&BTreeSet<PairId>> {
        self.entries.get(&pair).and_then(|courses| courses.get(&course))
    }

    pub fn courses(&self, pair: PairId) -> impl Iterator<Item = (&Course, &BTreeSet<PairId>)> {
        self.entries.get(&pair).into_iter().flat_map(|c| c.iter())
    }

    pub fn has_dined_together(&self, a: PairId, b: PairId) -> bool {
        self.courses(a).any(|(_, seen)| seen.contains(&b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of group formation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPlan {
    /// Every pair handed to the engine; indexed by [`PairId`]
    pub pairs: Vec<Pair>,
    pub groups: Vec<Group>,
    pub successors: Vec<PairId>,
    pub history: DiningHistory,
}

impl GroupPlan {
    #[inline]
    pub fn pair(&self, id: PairId) -> &Pair {
        &self.pairs[id.0]
    }

    pub fn groups_for_course(&self, course: Course) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(move |g| g.course == course)
    }

    /// The group a pair attends for `course`, if it was scheduled
    pub fn group_of(&self, id: PairId, course: Course) -> Option<&Group> {
        self.groups_for_course(course).find(|g| g.contains(id))
    }

    /// The course a pair cooks for, if it was scheduled
    pub fn hosted_course(&self, id: PairId) -> Option<Course> {
        self.groups.iter().find(|g| g.host == id).map(|g| g.course)
    }

    pub fn successor_pairs(&self) -> impl Iterator<Item = &Pair> {
        self.successors.iter().map(|&id| self.pair(id))
    }
}
