//! Edit reducer tests over the fixture plan and catalog.

use coachplan_core::catalog::CatalogIndex;
use coachplan_core::model::{Macros, Plan, SetValue};
use coachplan_core::plan::{EditAction, EditError, apply_edit};
use coachplan_test_utils::{sample_catalog, sample_plan, top_level_ids};

fn catalog() -> CatalogIndex {
    CatalogIndex::build(sample_catalog())
}

/// Index of the "Lower" day in the fixture plan.
const LOWER: usize = 1;

fn toggle(day: usize, id: &str) -> EditAction {
    EditAction::ToggleExercise {
        day,
        exercise_id: id.to_owned(),
    }
}

#[test]
fn toggle_adds_catalog_exercise() {
    let next = apply_edit(&sample_plan(), &toggle(0, "bench"), &catalog()).unwrap();
    assert_eq!(top_level_ids(&next.trainings[0].exercises), vec!["bench"]);
}

#[test]
fn toggle_rejects_unknown_exercise() {
    let err = apply_edit(&sample_plan(), &toggle(0, "curl"), &catalog()).unwrap_err();
    assert_eq!(err, EditError::UnknownExercise("curl".into()));
}

#[test]
fn toggle_removes_present_exercise_even_when_not_in_catalog() {
    let mut plan = sample_plan();
    plan.trainings[LOWER]
        .exercises
        .push(coachplan_test_utils::entry("retired"));
    let next = apply_edit(&plan, &toggle(LOWER, "retired"), &catalog()).unwrap();
    assert_eq!(top_level_ids(&next.trainings[LOWER].exercises), vec!["squat", "lunge"]);
}

#[test]
fn day_index_out_of_range() {
    let err = apply_edit(&sample_plan(), &toggle(7, "bench"), &catalog()).unwrap_err();
    assert_eq!(err, EditError::DayIndexOutOfRange { index: 7, len: 2 });
}

#[test]
fn add_day_rejects_duplicate_name() {
    let err = apply_edit(
        &sample_plan(),
        &EditAction::AddDay {
            name: "Lower".into(),
        },
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(err, EditError::DuplicateDayName("Lower".into()));
}

#[test]
fn remove_day_drops_it() {
    let next = apply_edit(&sample_plan(), &EditAction::RemoveDay { day: 0 }, &catalog()).unwrap();
    assert_eq!(next.trainings.len(), 1);
    assert_eq!(next.trainings[0].name, "Lower");
}

#[test]
fn set_editing_sequence() {
    let plan = sample_plan();
    let cat = catalog();

    let plan = apply_edit(
        &plan,
        &EditAction::SetSets {
            day: LOWER,
            exercise_id: "squat".into(),
            sets: vec![SetValue::Reps(5), SetValue::Reps(5)],
        },
        &cat,
    )
    .unwrap();
    let plan = apply_edit(
        &plan,
        &EditAction::AddSet {
            day: LOWER,
            exercise_id: "squat".into(),
            value: SetValue::from("to failure"),
        },
        &cat,
    )
    .unwrap();
    let plan = apply_edit(
        &plan,
        &EditAction::EditSet {
            day: LOWER,
            exercise_id: "squat".into(),
            index: 0,
            value: SetValue::Reps(3),
        },
        &cat,
    )
    .unwrap();

    let squat = plan.trainings[LOWER].entry("squat").unwrap();
    assert_eq!(
        squat.sets,
        vec![
            SetValue::Reps(3),
            SetValue::Reps(5),
            SetValue::from("to failure"),
        ]
    );
}

#[test]
fn set_sets_rejects_empty_and_missing() {
    let err = apply_edit(
        &sample_plan(),
        &EditAction::SetSets {
            day: LOWER,
            exercise_id: "squat".into(),
            sets: vec![],
        },
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(err, EditError::EmptySets("squat".into()));

    let err = apply_edit(
        &sample_plan(),
        &EditAction::SetSets {
            day: LOWER,
            exercise_id: "row".into(),
            sets: vec![SetValue::Reps(8)],
        },
        &catalog(),
    )
    .unwrap_err();
    assert!(matches!(err, EditError::ExerciseNotInDay { .. }), "got: {err}");
}

#[test]
fn edit_set_out_of_range() {
    let err = apply_edit(
        &sample_plan(),
        &EditAction::EditSet {
            day: LOWER,
            exercise_id: "lunge".into(),
            index: 3,
            value: SetValue::Reps(1),
        },
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        EditError::SetIndexOutOfRange {
            exercise_id: "lunge".into(),
            index: 3,
            len: 3,
        }
    );
}

#[test]
fn merge_and_split_through_reducer() {
    let cat = catalog();
    let merged = apply_edit(
        &sample_plan(),
        &EditAction::MergeSuperset {
            day: LOWER,
            exercise_ids: vec!["squat".into(), "lunge".into()],
        },
        &cat,
    )
    .unwrap();
    let lower = &merged.trainings[LOWER];
    assert_eq!(top_level_ids(&lower.exercises), vec!["squat"]);
    assert_eq!(lower.exercises[0].superset_exercise_ids, vec!["lunge"]);

    let split = apply_edit(
        &merged,
        &EditAction::SplitSuperset {
            day: LOWER,
            exercise_ids: vec!["lunge".into()],
        },
        &cat,
    )
    .unwrap();
    let lower = &split.trainings[LOWER];
    assert_eq!(top_level_ids(&lower.exercises), vec!["squat"]);
    assert!(lower.exercises[0].superset_exercise_ids.is_empty());
}

#[test]
fn merge_needs_two_distinct_ids() {
    let err = apply_edit(
        &sample_plan(),
        &EditAction::MergeSuperset {
            day: LOWER,
            exercise_ids: vec!["squat".into(), "squat".into()],
        },
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(err, EditError::MergeNeedsTwo);
}

/// The fixture plan with Lower's lunge grouped under squat.
fn lower_superset() -> Plan {
    apply_edit(
        &sample_plan(),
        &EditAction::MergeSuperset {
            day: LOWER,
            exercise_ids: vec!["squat".into(), "lunge".into()],
        },
        &catalog(),
    )
    .unwrap()
}

#[test]
fn merge_of_members_only_needs_an_anchor() {
    // Lower = [squat{lunge,row}]
    let mut plan = lower_superset();
    plan.trainings[LOWER].exercises[0]
        .superset_exercise_ids
        .push("row".into());
    let err = apply_edit(
        &plan,
        &EditAction::MergeSuperset {
            day: LOWER,
            exercise_ids: vec!["lunge".into(), "row".into()],
        },
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(err, EditError::MergeNeedsAnchor("Lower".into()));
}

#[test]
fn set_edits_on_a_member_say_it_has_no_sets() {
    let plan = lower_superset();
    let expected = EditError::MemberHasNoSets {
        day: "Lower".into(),
        exercise_id: "lunge".into(),
    };

    let err = apply_edit(
        &plan,
        &EditAction::SetSets {
            day: LOWER,
            exercise_id: "lunge".into(),
            sets: vec![SetValue::Reps(8)],
        },
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(err, expected);

    let err = apply_edit(
        &plan,
        &EditAction::AddSet {
            day: LOWER,
            exercise_id: "lunge".into(),
            value: SetValue::Reps(8),
        },
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(err, expected);
}

#[test]
fn merge_rejects_ids_outside_the_day() {
    let err = apply_edit(
        &sample_plan(),
        &EditAction::MergeSuperset {
            day: LOWER,
            exercise_ids: vec!["squat".into(), "bench".into()],
        },
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        EditError::ExerciseNotInDay {
            day: "Lower".into(),
            exercise_id: "bench".into(),
        }
    );
}

#[test]
fn diet_edits() {
    let cat = catalog();
    let plan = apply_edit(
        &sample_plan(),
        &EditAction::AddDiet {
            macros: Macros::new(150, 60, 200),
        },
        &cat,
    )
    .unwrap();
    let plan = apply_edit(
        &plan,
        &EditAction::SetDiet {
            index: 0,
            macros: Macros::new(160, 60, 180),
        },
        &cat,
    )
    .unwrap();
    assert_eq!(plan.diets, vec![Macros::new(160, 60, 180)]);

    let err = apply_edit(&plan, &EditAction::RemoveDiet { index: 1 }, &cat).unwrap_err();
    assert_eq!(err, EditError::DietIndexOutOfRange { index: 1, len: 1 });

    let plan = apply_edit(&plan, &EditAction::RemoveDiet { index: 0 }, &cat).unwrap();
    assert!(plan.diets.is_empty());
}

#[test]
fn rest_and_notes() {
    let cat = catalog();
    let plan = apply_edit(
        &sample_plan(),
        &EditAction::SetRest {
            set_seconds: 90,
            exercise_seconds: 180,
        },
        &cat,
    )
    .unwrap();
    let plan = apply_edit(&plan, &EditAction::SetDifferentRestOnOffDays { enabled: true }, &cat).unwrap();
    let plan = apply_edit(
        &plan,
        &EditAction::SetNotes {
            notes: "deload week 4".into(),
        },
        &cat,
    )
    .unwrap();

    assert_eq!(plan.set_rest_seconds, 90);
    assert_eq!(plan.exercise_rest_seconds, 180);
    assert!(plan.different_rest_on_off_days);
    assert_eq!(plan.notes, "deload week 4");
}

#[test]
fn failed_edit_leaves_input_untouched() {
    let plan = sample_plan();
    let _ = apply_edit(&plan, &EditAction::RemoveDay { day: 9 }, &catalog());
    assert_eq!(plan, sample_plan());
}
