//! Catalog grouping and day numbering over the shared fixture catalog.

use coachplan_core::catalog::{CatalogIndex, load_catalog_json};
use coachplan_core::model::TrainingDay;
use coachplan_core::plan::{RowRole, flatten_numbering, quantity};
use coachplan_test_utils::{day, entry, sample_catalog};

#[test]
fn catalog_groups_follow_first_seen_order() {
    let index = CatalogIndex::build(sample_catalog());

    let groups: Vec<(&str, Vec<&str>)> = index
        .groups()
        .iter()
        .map(|g| {
            (
                g.name.as_str(),
                g.exercises.iter().map(|e| e.id.as_str()).collect(),
            )
        })
        .collect();
    assert_eq!(
        groups,
        vec![
            ("legs", vec!["squat", "lunge"]),
            ("chest", vec!["bench", "fly"]),
            ("back", vec!["row", "deadlift"]),
        ]
    );
    assert_eq!(index.len(), 6);
}

#[test]
fn catalog_lookup_by_id() {
    let index = CatalogIndex::build(sample_catalog());
    assert_eq!(index.name_of("fly"), Some("Cable Fly"));
    assert_eq!(index.find_by_id("row").map(|d| d.muscle_group.as_str()), Some("back"));
    assert!(index.find_by_id("curl").is_none());
}

#[test]
fn catalog_from_server_json() {
    let json = r#"[
        {"id": "x1", "muscleGroup": "legs", "name": "Squat"},
        {"id": "x2", "muscleGroup": "arms", "name": "Curl"},
        {"id": "x3", "muscleGroup": "legs", "name": "Lunge"}
    ]"#;
    let index = load_catalog_json(json).unwrap();
    let legs = index.group("legs").unwrap();
    assert_eq!(legs.exercises.len(), 2);
    assert_eq!(index.groups()[1].name, "arms");
}

#[test]
fn empty_catalog_has_no_groups() {
    let index = load_catalog_json("[]").unwrap();
    assert!(index.is_empty());
    assert!(index.groups().is_empty());
}

#[test]
fn superset_rows_are_numbered_consecutively() {
    let catalog = CatalogIndex::build(sample_catalog());
    let training = TrainingDay::with_exercises(
        "Push",
        vec![entry("squat").with_superset(["bench", "fly"]), entry("row")],
    );

    assert_eq!(quantity(&training), 4);
    let rows = flatten_numbering(&training, &catalog);
    let summary: Vec<(usize, &str, RowRole)> = rows
        .iter()
        .map(|r| (r.number, r.label(), r.role))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, "Back Squat", RowRole::Anchor),
            (2, "Bench Press", RowRole::Member),
            (3, "Cable Fly", RowRole::Member),
            (4, "Barbell Row", RowRole::Standalone),
        ]
    );

    let last_flags: Vec<bool> = rows.iter().map(|r| r.is_last_in_group).collect();
    assert_eq!(last_flags, vec![false, false, true, true]);
}

#[test]
fn anchor_rows_carry_sets_and_members_do_not() {
    let catalog = CatalogIndex::build(sample_catalog());
    let training = TrainingDay::with_exercises("A", vec![entry("squat").with_superset(["lunge"])]);
    let rows = flatten_numbering(&training, &catalog);
    assert_eq!(rows[0].sets.map(<[_]>::len), Some(3));
    assert!(rows[1].sets.is_none());
}

#[test]
fn plain_day_numbering_counts_entries() {
    let catalog = CatalogIndex::build(sample_catalog());
    let training = day("Legs", &["squat", "lunge", "deadlift"]);
    let numbers: Vec<usize> = flatten_numbering(&training, &catalog)
        .iter()
        .map(|r| r.number)
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(quantity(&training), 3);
}
