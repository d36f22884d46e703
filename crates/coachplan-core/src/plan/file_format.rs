//! TOML format types for plan files.
//!
//! These types map directly to the on-disk `plan.toml` layout and are
//! deserialized via `serde` + the `toml` crate. Dates are quoted
//! `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Macros, Plan, PlanExerciseEntry, SetSequence, TrainingDay};

use super::draft::PlanDraft;
use super::mutate::default_sets;

/// Top-level structure of a plan file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanFile {
    /// Plan metadata.
    pub plan: PlanMeta,
    /// Training days, in display order.
    #[serde(default)]
    pub trainings: Vec<DayFile>,
    /// Daily macro targets.
    #[serde(default)]
    pub diets: Vec<Macros>,
}

/// Plan-level settings in `[plan]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanMeta {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Free-form notes for the customer.
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_set_rest")]
    pub set_rest_seconds: u32,
    #[serde(default = "default_exercise_rest")]
    pub exercise_rest_seconds: u32,
    #[serde(default)]
    pub different_rest_on_off_days: bool,
}

/// A single `[[trainings]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayFile {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<EntryFile>,
}

/// A single `[[trainings.exercises]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryFile {
    pub exercise_id: String,
    /// Reps per set. Defaults to three sets of 12.
    #[serde(default = "default_sets")]
    pub sets: SetSequence,
    /// Ids of exercises performed back-to-back with this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub superset: Vec<String>,
}

fn default_set_rest() -> u32 {
    PlanDraft::DEFAULT_SET_REST_SECONDS
}

fn default_exercise_rest() -> u32 {
    PlanDraft::DEFAULT_EXERCISE_REST_SECONDS
}

impl From<&Plan> for PlanFile {
    fn from(plan: &Plan) -> Self {
        Self {
            plan: PlanMeta {
                start_date: plan.start_date,
                end_date: plan.end_date,
                notes: plan.notes.clone(),
                set_rest_seconds: plan.set_rest_seconds,
                exercise_rest_seconds: plan.exercise_rest_seconds,
                different_rest_on_off_days: plan.different_rest_on_off_days,
            },
            trainings: plan
                .trainings
                .iter()
                .map(|day| DayFile {
                    name: day.name.clone(),
                    exercises: day
                        .exercises
                        .iter()
                        .map(|e| EntryFile {
                            exercise_id: e.exercise_id.clone(),
                            sets: e.sets.clone(),
                            superset: e.superset_exercise_ids.clone(),
                        })
                        .collect(),
                })
                .collect(),
            diets: plan.diets.clone(),
        }
    }
}

impl From<PlanFile> for Plan {
    fn from(file: PlanFile) -> Self {
        Self {
            start_date: file.plan.start_date,
            end_date: file.plan.end_date,
            trainings: file
                .trainings
                .into_iter()
                .map(|day| TrainingDay {
                    name: day.name,
                    exercises: day
                        .exercises
                        .into_iter()
                        .map(|e| PlanExerciseEntry {
                            exercise_id: e.exercise_id,
                            sets: e.sets,
                            superset_exercise_ids: e.superset,
                        })
                        .collect(),
                })
                .collect(),
            notes: file.plan.notes,
            set_rest_seconds: file.plan.set_rest_seconds,
            exercise_rest_seconds: file.plan.exercise_rest_seconds,
            different_rest_on_off_days: file.plan.different_rest_on_off_days,
            diets: file.diets,
        }
    }
}
