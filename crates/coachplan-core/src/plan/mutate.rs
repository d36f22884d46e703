//! Pure plan mutations.
//!
//! Every function borrows its input and returns a new value; the caller
//! stores the result back into its own state. Lookup misses are not errors
//! here: the input comes back unchanged and the miss is logged at `debug`.
//! Callers that need a reason should go through [`super::apply_edit`].

use tracing::debug;

use crate::model::{Plan, PlanExerciseEntry, SetSequence, SetValue};

/// Reps used for every set of a newly added exercise.
pub const DEFAULT_REPS: &str = "12";

/// Number of sets given to a newly added exercise.
pub const DEFAULT_SET_COUNT: usize = 3;

/// Sets assigned to an exercise when it is first added to a day.
pub fn default_sets() -> SetSequence {
    vec![SetValue::from(DEFAULT_REPS); DEFAULT_SET_COUNT]
}

/// Add, update, or toggle off an exercise in the first day named `day_name`.
///
/// - Unknown day: the plan is returned unchanged.
/// - Empty day: the exercise becomes its only entry, with [`default_sets`].
/// - Exercise already present with `sets_override`: its sets are replaced.
/// - Exercise already present without an override: it is removed (tap to
///   add, tap again to remove).
/// - Otherwise the exercise is appended with [`default_sets`].
pub fn add_or_update_exercise(
    plan: &Plan,
    day_name: &str,
    exercise_id: &str,
    sets_override: Option<SetSequence>,
) -> Plan {
    let Some(day) = plan.day_index(day_name) else {
        debug!(day = %day_name, exercise_id = %exercise_id, "no such training day, plan unchanged");
        return plan.clone();
    };
    let exercises = toggle_or_update(&plan.trainings[day].exercises, exercise_id, sets_override);
    with_day_exercises(plan, day, exercises)
}

/// Replace the whole exercise list of the first day named `day_name`.
pub fn replace_exercises_for_day(
    plan: &Plan,
    day_name: &str,
    exercises: Vec<PlanExerciseEntry>,
) -> Plan {
    match plan.day_index(day_name) {
        Some(day) => with_day_exercises(plan, day, exercises),
        None => {
            debug!(day = %day_name, "no such training day, plan unchanged");
            plan.clone()
        }
    }
}

/// Group the selected exercises into one superset.
///
/// The first top-level entry (in list order) whose id is selected becomes
/// the anchor. The other selected ids are appended to its members in
/// selection order and their top-level entries are removed. A selected entry
/// that already anchors a superset brings its members along, right after
/// itself. Selected ids that were members of other anchors move to the new
/// group.
///
/// Ids not present in the list are ignored. With fewer than two usable ids,
/// or when none of them is a top-level entry, the list comes back unchanged.
pub fn merge_into_superset<S: AsRef<str>>(
    exercises: &[PlanExerciseEntry],
    selected_ids: &[S],
) -> Vec<PlanExerciseEntry> {
    let selected = known_selection(exercises, selected_ids);
    if selected.len() < 2 {
        debug!(selected = selected.len(), "merge needs at least two exercises, list unchanged");
        return exercises.to_vec();
    }

    let Some(anchor) = exercises
        .iter()
        .find(|e| selected.contains(&e.exercise_id.as_str()))
    else {
        debug!("no selected exercise is a top-level entry, list unchanged");
        return exercises.to_vec();
    };
    let anchor_id = anchor.exercise_id.as_str();

    let mut members = anchor.superset_exercise_ids.clone();
    for id in selected.iter().copied().filter(|id| *id != anchor_id) {
        push_unique(&mut members, id);
        if let Some(absorbed) = exercises.iter().find(|e| e.exercise_id == id) {
            for member in absorbed
                .superset_exercise_ids
                .iter()
                .filter(|m| m.as_str() != anchor_id)
            {
                push_unique(&mut members, member);
            }
        }
    }

    exercises
        .iter()
        .filter_map(|entry| {
            if entry.exercise_id == anchor_id {
                let mut merged = entry.clone();
                merged.superset_exercise_ids = members.clone();
                Some(merged)
            } else if selected.contains(&entry.exercise_id.as_str()) {
                None
            } else {
                Some(without_members(entry, &selected))
            }
        })
        .collect()
}

/// Remove the selected exercises from their superset groups and delete their
/// top-level entries.
///
/// Ungrouping and deleting are one operation: a selected member leaves its
/// group, and a selected top-level entry leaves the day together with any
/// members it still anchors.
pub fn split_from_superset<S: AsRef<str>>(
    exercises: &[PlanExerciseEntry],
    selected_ids: &[S],
) -> Vec<PlanExerciseEntry> {
    let selected: Vec<&str> = selected_ids.iter().map(AsRef::as_ref).collect();
    exercises
        .iter()
        .filter(|entry| !selected.contains(&entry.exercise_id.as_str()))
        .map(|entry| without_members(entry, &selected))
        .collect()
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// The add/update/toggle rule of [`add_or_update_exercise`] applied to one
/// day's exercise list.
///
/// An id that is only a superset member is toggled out of its group when no
/// override is given; members carry no sets, so an override leaves them alone.
pub(crate) fn toggle_or_update(
    exercises: &[PlanExerciseEntry],
    exercise_id: &str,
    sets_override: Option<SetSequence>,
) -> Vec<PlanExerciseEntry> {
    if exercises.is_empty() {
        return vec![PlanExerciseEntry::new(exercise_id, default_sets())];
    }

    if let Some(pos) = exercises.iter().position(|e| e.exercise_id == exercise_id) {
        let mut updated = exercises.to_vec();
        match sets_override {
            Some(sets) => updated[pos].sets = sets,
            None => {
                updated.remove(pos);
            }
        }
        return updated;
    }

    if exercises.iter().any(|e| e.has_member(exercise_id)) {
        if sets_override.is_some() {
            debug!(exercise_id = %exercise_id, "superset members have no sets of their own, list unchanged");
            return exercises.to_vec();
        }
        return split_from_superset(exercises, &[exercise_id]);
    }

    let mut updated = exercises.to_vec();
    updated.push(PlanExerciseEntry::new(exercise_id, default_sets()));
    updated
}

/// Copy of `plan` with day `day` holding `exercises`.
pub(crate) fn with_day_exercises(
    plan: &Plan,
    day: usize,
    exercises: Vec<PlanExerciseEntry>,
) -> Plan {
    let mut next = plan.clone();
    next.trainings[day].exercises = exercises;
    next
}

/// Deduplicated selection, restricted to ids present in `exercises`.
fn known_selection<'a, S: AsRef<str>>(
    exercises: &[PlanExerciseEntry],
    selected_ids: &'a [S],
) -> Vec<&'a str> {
    let mut selection: Vec<&str> = Vec::new();
    for id in selected_ids.iter().map(AsRef::as_ref) {
        let known = exercises
            .iter()
            .any(|e| e.exercise_id == id || e.has_member(id));
        if known && !selection.contains(&id) {
            selection.push(id);
        }
    }
    selection
}

fn without_members(entry: &PlanExerciseEntry, ids: &[&str]) -> PlanExerciseEntry {
    let mut next = entry.clone();
    next.superset_exercise_ids
        .retain(|m| !ids.contains(&m.as_str()));
    next
}

fn push_unique(members: &mut Vec<String>, id: &str) {
    if !members.iter().any(|m| m == id) {
        members.push(id.to_owned());
    }
}
