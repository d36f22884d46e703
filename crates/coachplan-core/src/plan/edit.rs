//! Typed plan edits.
//!
//! An editor turns each user action into one [`EditAction`] and feeds it to
//! [`apply_edit`], which either returns the next plan or says why the action
//! does not apply. Days are addressed by index, so two days sharing a name
//! can still be edited independently.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::CatalogIndex;
use crate::model::{Macros, Plan, PlanExerciseEntry, SetSequence, SetValue, TrainingDay};

use super::mutate::{merge_into_superset, split_from_superset, toggle_or_update, with_day_exercises};

/// One user edit of a plan. Day, set, and diet indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditAction {
    AddDay { name: String },
    RenameDay { day: usize, name: String },
    RemoveDay { day: usize },
    /// Add the exercise with default sets, or remove it if already present.
    ToggleExercise { day: usize, exercise_id: String },
    SetSets { day: usize, exercise_id: String, sets: SetSequence },
    AddSet { day: usize, exercise_id: String, value: SetValue },
    EditSet { day: usize, exercise_id: String, index: usize, value: SetValue },
    RemoveSet { day: usize, exercise_id: String, index: usize },
    MergeSuperset { day: usize, exercise_ids: Vec<String> },
    /// Ungroup the exercises and delete their top-level entries.
    SplitSuperset { day: usize, exercise_ids: Vec<String> },
    SetNotes { notes: String },
    SetRest { set_seconds: u32, exercise_seconds: u32 },
    SetDifferentRestOnOffDays { enabled: bool },
    AddDiet { macros: Macros },
    SetDiet { index: usize, macros: Macros },
    RemoveDiet { index: usize },
    SetDates { start: NaiveDate, end: NaiveDate },
}

/// Reasons an [`EditAction`] cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("day index {index} out of range (plan has {len} days)")]
    DayIndexOutOfRange { index: usize, len: usize },

    #[error("a training day named {0:?} already exists")]
    DuplicateDayName(String),

    #[error("training day name must not be empty")]
    EmptyDayName,

    #[error("exercise {0:?} is not in the catalog")]
    UnknownExercise(String),

    #[error("exercise {exercise_id:?} is not in day {day:?}")]
    ExerciseNotInDay { day: String, exercise_id: String },

    #[error("set index {index} out of range for exercise {exercise_id:?} ({len} sets)")]
    SetIndexOutOfRange {
        exercise_id: String,
        index: usize,
        len: usize,
    },

    #[error("exercise {exercise_id:?} is a superset member in day {day:?} and has no sets of its own")]
    MemberHasNoSets { day: String, exercise_id: String },

    #[error("exercise {0:?} must keep at least one set")]
    EmptySets(String),

    #[error("diet index {index} out of range (plan has {len} diets)")]
    DietIndexOutOfRange { index: usize, len: usize },

    #[error("a superset needs at least two distinct exercises")]
    MergeNeedsTwo,

    #[error("none of the selected exercises is a top-level entry of day {0:?}")]
    MergeNeedsAnchor(String),

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

/// Apply one edit to `plan`, returning the edited copy.
///
/// `catalog` is consulted when an exercise is added to a day.
pub fn apply_edit(plan: &Plan, action: &EditAction, catalog: &CatalogIndex) -> Result<Plan, EditError> {
    debug!(?action, "applying plan edit");
    match action {
        EditAction::AddDay { name } => {
            let name = checked_day_name(plan, name, None)?;
            let mut next = plan.clone();
            next.trainings.push(TrainingDay::new(name));
            Ok(next)
        }
        EditAction::RenameDay { day, name } => {
            check_day(plan, *day)?;
            let name = checked_day_name(plan, name, Some(*day))?;
            let mut next = plan.clone();
            next.trainings[*day].name = name;
            Ok(next)
        }
        EditAction::RemoveDay { day } => {
            check_day(plan, *day)?;
            let mut next = plan.clone();
            next.trainings.remove(*day);
            Ok(next)
        }
        EditAction::ToggleExercise { day, exercise_id } => {
            let current = check_day(plan, *day)?;
            if !current.contains(exercise_id) && catalog.find_by_id(exercise_id).is_none() {
                return Err(EditError::UnknownExercise(exercise_id.clone()));
            }
            let exercises = toggle_or_update(&current.exercises, exercise_id, None);
            Ok(with_day_exercises(plan, *day, exercises))
        }
        EditAction::SetSets {
            day,
            exercise_id,
            sets,
        } => {
            let current = check_day(plan, *day)?;
            entry_index(current, exercise_id)?;
            if sets.is_empty() {
                return Err(EditError::EmptySets(exercise_id.clone()));
            }
            let exercises = toggle_or_update(&current.exercises, exercise_id, Some(sets.clone()));
            Ok(with_day_exercises(plan, *day, exercises))
        }
        EditAction::AddSet {
            day,
            exercise_id,
            value,
        } => edit_entry(plan, *day, exercise_id, |entry| {
            entry.push_set(value.clone());
            Ok(())
        }),
        EditAction::EditSet {
            day,
            exercise_id,
            index,
            value,
        } => edit_entry(plan, *day, exercise_id, |entry| {
            let len = entry.sets.len();
            if entry.edit_set(*index, value.clone()) {
                Ok(())
            } else {
                Err(EditError::SetIndexOutOfRange {
                    exercise_id: exercise_id.clone(),
                    index: *index,
                    len,
                })
            }
        }),
        EditAction::RemoveSet {
            day,
            exercise_id,
            index,
        } => edit_entry(plan, *day, exercise_id, |entry| {
            let len = entry.sets.len();
            if *index >= len {
                return Err(EditError::SetIndexOutOfRange {
                    exercise_id: exercise_id.clone(),
                    index: *index,
                    len,
                });
            }
            if len == 1 {
                return Err(EditError::EmptySets(exercise_id.clone()));
            }
            entry.remove_set(*index);
            Ok(())
        }),
        EditAction::MergeSuperset { day, exercise_ids } => {
            let current = check_day(plan, *day)?;
            check_members(current, exercise_ids)?;
            let distinct: HashSet<&str> = exercise_ids.iter().map(String::as_str).collect();
            if distinct.len() < 2 {
                return Err(EditError::MergeNeedsTwo);
            }
            if !current.exercises.iter().any(|e| distinct.contains(e.exercise_id.as_str())) {
                return Err(EditError::MergeNeedsAnchor(current.name.clone()));
            }
            let exercises = merge_into_superset(&current.exercises, exercise_ids);
            Ok(with_day_exercises(plan, *day, exercises))
        }
        EditAction::SplitSuperset { day, exercise_ids } => {
            let current = check_day(plan, *day)?;
            check_members(current, exercise_ids)?;
            let exercises = split_from_superset(&current.exercises, exercise_ids);
            Ok(with_day_exercises(plan, *day, exercises))
        }
        EditAction::SetNotes { notes } => {
            let mut next = plan.clone();
            next.notes = notes.clone();
            Ok(next)
        }
        EditAction::SetRest {
            set_seconds,
            exercise_seconds,
        } => {
            let mut next = plan.clone();
            next.set_rest_seconds = *set_seconds;
            next.exercise_rest_seconds = *exercise_seconds;
            Ok(next)
        }
        EditAction::SetDifferentRestOnOffDays { enabled } => {
            let mut next = plan.clone();
            next.different_rest_on_off_days = *enabled;
            Ok(next)
        }
        EditAction::AddDiet { macros } => {
            let mut next = plan.clone();
            next.diets.push(*macros);
            Ok(next)
        }
        EditAction::SetDiet { index, macros } => {
            check_diet(plan, *index)?;
            let mut next = plan.clone();
            next.diets[*index] = *macros;
            Ok(next)
        }
        EditAction::RemoveDiet { index } => {
            check_diet(plan, *index)?;
            let mut next = plan.clone();
            next.diets.remove(*index);
            Ok(next)
        }
        EditAction::SetDates { start, end } => {
            if start > end {
                return Err(EditError::InvalidDateRange {
                    start: *start,
                    end: *end,
                });
            }
            let mut next = plan.clone();
            next.start_date = *start;
            next.end_date = *end;
            Ok(next)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_day(plan: &Plan, day: usize) -> Result<&TrainingDay, EditError> {
    plan.trainings.get(day).ok_or(EditError::DayIndexOutOfRange {
        index: day,
        len: plan.trainings.len(),
    })
}

fn check_diet(plan: &Plan, index: usize) -> Result<(), EditError> {
    if index < plan.diets.len() {
        Ok(())
    } else {
        Err(EditError::DietIndexOutOfRange {
            index,
            len: plan.diets.len(),
        })
    }
}

/// Trimmed, non-empty name not used by any day other than `except`.
fn checked_day_name(plan: &Plan, name: &str, except: Option<usize>) -> Result<String, EditError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EditError::EmptyDayName);
    }
    let taken = plan
        .trainings
        .iter()
        .enumerate()
        .any(|(i, d)| Some(i) != except && d.name == name);
    if taken {
        return Err(EditError::DuplicateDayName(name.to_owned()));
    }
    Ok(name.to_owned())
}

fn entry_index(day: &TrainingDay, exercise_id: &str) -> Result<usize, EditError> {
    if let Some(pos) = day.exercises.iter().position(|e| e.exercise_id == exercise_id) {
        return Ok(pos);
    }
    let day_name = day.name.clone();
    let exercise_id = exercise_id.to_owned();
    if day.contains(&exercise_id) {
        Err(EditError::MemberHasNoSets {
            day: day_name,
            exercise_id,
        })
    } else {
        Err(EditError::ExerciseNotInDay {
            day: day_name,
            exercise_id,
        })
    }
}

fn check_members(day: &TrainingDay, exercise_ids: &[String]) -> Result<(), EditError> {
    match exercise_ids.iter().find(|id| !day.contains(id)) {
        Some(missing) => Err(EditError::ExerciseNotInDay {
            day: day.name.clone(),
            exercise_id: missing.clone(),
        }),
        None => Ok(()),
    }
}

/// Run `f` on a copy of the top-level entry and return the updated plan.
fn edit_entry<F>(plan: &Plan, day: usize, exercise_id: &str, f: F) -> Result<Plan, EditError>
where
    F: FnOnce(&mut PlanExerciseEntry) -> Result<(), EditError>,
{
    let current = check_day(plan, day)?;
    let pos = entry_index(current, exercise_id)?;
    let mut next = plan.clone();
    f(&mut next.trainings[day].exercises[pos])?;
    Ok(next)
}
