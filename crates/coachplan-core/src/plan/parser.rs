//! Plan file parser with validation.
//!
//! Parses a plan TOML string into a [`Plan`] and validates:
//! - The start date is not after the end date.
//! - Training day names are non-empty and unique.
//! - No exercise appears twice as a top-level entry of one day.
//! - Every exercise keeps at least one set.
//! - Superset membership is exclusive: a member is never an anchor, never
//!   its own anchor, and never in two groups.

use std::collections::HashSet;

use chrono::NaiveDate;
use thiserror::Error;

use crate::catalog::CatalogIndex;
use crate::model::Plan;

use super::file_format::PlanFile;

/// Errors that can occur during plan parsing and validation.
#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("training day name must not be empty (day #{0})")]
    EmptyDayName(usize),

    #[error("duplicate training day name: {0:?}")]
    DuplicateDayName(String),

    #[error("exercise {exercise_id:?} appears twice in day {day:?}")]
    DuplicateExercise { day: String, exercise_id: String },

    #[error("exercise {exercise_id:?} in day {day:?} has no sets")]
    EmptySets { day: String, exercise_id: String },

    #[error("superset conflict in day {day:?}: {exercise_id:?} {reason}")]
    SupersetConflict {
        day: String,
        exercise_id: String,
        reason: &'static str,
    },
}

/// Parse and validate a plan TOML string.
pub fn parse_plan_toml(content: &str) -> Result<Plan, PlanParseError> {
    let file: PlanFile = toml::from_str(content)?;
    let plan = Plan::from(file);
    validate_plan(&plan)?;
    Ok(plan)
}

/// Serialize a plan to TOML.
pub fn render_plan_toml(plan: &Plan) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&PlanFile::from(plan))
}

/// Validate the structure of a plan.
pub fn validate_plan(plan: &Plan) -> Result<(), PlanParseError> {
    if plan.start_date > plan.end_date {
        return Err(PlanParseError::InvalidDateRange {
            start: plan.start_date,
            end: plan.end_date,
        });
    }

    let mut day_names = HashSet::new();
    for (i, day) in plan.trainings.iter().enumerate() {
        if day.name.trim().is_empty() {
            return Err(PlanParseError::EmptyDayName(i + 1));
        }
        if !day_names.insert(day.name.as_str()) {
            return Err(PlanParseError::DuplicateDayName(day.name.clone()));
        }

        let anchors: HashSet<&str> = day.exercises.iter().map(|e| e.exercise_id.as_str()).collect();
        if anchors.len() != day.exercises.len() {
            let mut seen = HashSet::new();
            let dup = day
                .exercises
                .iter()
                .find(|e| !seen.insert(e.exercise_id.as_str()))
                .map(|e| e.exercise_id.clone())
                .unwrap_or_default();
            return Err(PlanParseError::DuplicateExercise {
                day: day.name.clone(),
                exercise_id: dup,
            });
        }

        let mut members = HashSet::new();
        for entry in &day.exercises {
            if entry.sets.is_empty() {
                return Err(PlanParseError::EmptySets {
                    day: day.name.clone(),
                    exercise_id: entry.exercise_id.clone(),
                });
            }
            for member in &entry.superset_exercise_ids {
                let reason = if *member == entry.exercise_id {
                    Some("is a member of its own superset")
                } else if anchors.contains(member.as_str()) {
                    Some("is both a superset member and a top-level exercise")
                } else if !members.insert(member.as_str()) {
                    Some("is a member of more than one superset")
                } else {
                    None
                };
                if let Some(reason) = reason {
                    return Err(PlanParseError::SupersetConflict {
                        day: day.name.clone(),
                        exercise_id: member.clone(),
                        reason,
                    });
                }
            }
        }
    }

    Ok(())
}

/// Exercise ids used by the plan that the catalog does not know, one warning
/// per occurrence.
pub fn catalog_warnings(plan: &Plan, catalog: &CatalogIndex) -> Vec<String> {
    let mut warnings = Vec::new();
    for day in &plan.trainings {
        for entry in &day.exercises {
            let ids = std::iter::once(&entry.exercise_id).chain(&entry.superset_exercise_ids);
            for id in ids {
                if catalog.find_by_id(id).is_none() {
                    warnings.push(format!(
                        "day {:?}: exercise {:?} not found in catalog",
                        day.name, id
                    ));
                }
            }
        }
    }
    warnings
}
