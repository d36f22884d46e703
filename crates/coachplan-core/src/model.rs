use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// One exercise available for selection, as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDefinition {
    pub id: String,
    pub muscle_group: String,
    pub name: String,
}

impl ExerciseDefinition {
    pub fn new(
        id: impl Into<String>,
        muscle_group: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            muscle_group: muscle_group.into(),
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sets
// ---------------------------------------------------------------------------

/// Reps for a single set.
///
/// Coaches type either a plain number or free text such as `"8-10"` or
/// `"to failure"`, so both JSON numbers and strings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetValue {
    Reps(u32),
    Text(String),
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reps(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for SetValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SetValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u32> for SetValue {
    fn from(value: u32) -> Self {
        Self::Reps(value)
    }
}

/// Ordered sets of an exercise; position is the set number.
pub type SetSequence = Vec<SetValue>;

// ---------------------------------------------------------------------------
// Plan structure
// ---------------------------------------------------------------------------

/// One row of a training day: a standalone exercise or the anchor of a
/// superset group.
///
/// Superset members are stored by id only; they live inside their anchor and
/// never appear as top-level entries of the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanExerciseEntry {
    pub exercise_id: String,
    pub sets: SetSequence,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub superset_exercise_ids: Vec<String>,
}

impl PlanExerciseEntry {
    pub fn new(exercise_id: impl Into<String>, sets: SetSequence) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            sets,
            superset_exercise_ids: Vec::new(),
        }
    }

    /// Attach superset members (builder-style).
    pub fn with_superset<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.superset_exercise_ids = members.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this entry anchors a superset.
    pub fn is_anchor(&self) -> bool {
        !self.superset_exercise_ids.is_empty()
    }

    /// Whether `exercise_id` is one of this entry's superset members.
    pub fn has_member(&self, exercise_id: &str) -> bool {
        self.superset_exercise_ids.iter().any(|m| m == exercise_id)
    }

    /// Append a set at the end.
    pub fn push_set(&mut self, value: SetValue) {
        self.sets.push(value);
    }

    /// Replace the set at `index`. Returns `false` when out of range.
    pub fn edit_set(&mut self, index: usize, value: SetValue) -> bool {
        match self.sets.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Remove and return the set at `index`.
    pub fn remove_set(&mut self, index: usize) -> Option<SetValue> {
        (index < self.sets.len()).then(|| self.sets.remove(index))
    }
}

/// A named subdivision of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingDay {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<PlanExerciseEntry>,
}

impl TrainingDay {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exercises: Vec::new(),
        }
    }

    /// Build a day from pre-made entries.
    pub fn with_exercises(name: impl Into<String>, exercises: Vec<PlanExerciseEntry>) -> Self {
        Self {
            name: name.into(),
            exercises,
        }
    }

    /// Top-level entry for `exercise_id`, if any.
    pub fn entry(&self, exercise_id: &str) -> Option<&PlanExerciseEntry> {
        self.exercises.iter().find(|e| e.exercise_id == exercise_id)
    }

    /// Whether `exercise_id` appears anywhere in the day, as an entry or as a
    /// superset member.
    pub fn contains(&self, exercise_id: &str) -> bool {
        self.exercises
            .iter()
            .any(|e| e.exercise_id == exercise_id || e.has_member(exercise_id))
    }
}

/// Daily macronutrient targets, in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub proteins: u32,
    pub fats: u32,
    pub carbs: u32,
}

impl Macros {
    pub fn new(proteins: u32, fats: u32, carbs: u32) -> Self {
        Self {
            proteins,
            fats,
            carbs,
        }
    }

    /// Energy in kcal (4 per gram of protein and carbohydrate, 9 per gram of
    /// fat).
    pub fn calories(&self) -> u64 {
        u64::from(self.proteins) * 4 + u64::from(self.fats) * 9 + u64::from(self.carbs) * 4
    }
}

/// A time-boxed training and nutrition program for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub trainings: Vec<TrainingDay>,
    #[serde(default)]
    pub notes: String,
    pub set_rest_seconds: u32,
    pub exercise_rest_seconds: u32,
    #[serde(default)]
    pub different_rest_on_off_days: bool,
    #[serde(default)]
    pub diets: Vec<Macros>,
}

impl Plan {
    /// Index of the first training day named `name`.
    pub fn day_index(&self, name: &str) -> Option<usize> {
        self.trainings.iter().position(|d| d.name == name)
    }

    /// First training day named `name`.
    pub fn day(&self, name: &str) -> Option<&TrainingDay> {
        self.trainings.iter().find(|d| d.name == name)
    }

    /// Number of calendar days covered, both ends included.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

/// A coach's client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_plan_end_date: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields a coach fills in to register a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}
