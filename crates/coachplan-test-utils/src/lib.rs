//! Shared test fixtures for coachplan integration tests.
//!
//! Provides a small exercise catalog, plan builders, and a temporary data
//! directory seeded with catalog and customer files. Each test gets its own
//! directory, removed when the returned [`TempDir`] is dropped.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

use coachplan_core::backend::DirectoryBackend;
use coachplan_core::model::{
    Customer, ExerciseDefinition, Plan, PlanExerciseEntry, SetValue, TrainingDay,
};
use coachplan_core::plan::{PlanDraft, default_sets};

/// Calendar date shorthand.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(|| panic!("invalid date {y}-{m}-{d}"))
}

/// Midnight UTC on the given date.
pub fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid date {y}-{m}-{d}"))
}

/// A catalog spanning three muscle groups, in server order.
pub fn sample_catalog() -> Vec<ExerciseDefinition> {
    vec![
        ExerciseDefinition::new("squat", "legs", "Back Squat"),
        ExerciseDefinition::new("bench", "chest", "Bench Press"),
        ExerciseDefinition::new("lunge", "legs", "Walking Lunge"),
        ExerciseDefinition::new("row", "back", "Barbell Row"),
        ExerciseDefinition::new("fly", "chest", "Cable Fly"),
        ExerciseDefinition::new("deadlift", "back", "Deadlift"),
    ]
}

/// Entry with the default three sets of 12.
pub fn entry(id: &str) -> PlanExerciseEntry {
    PlanExerciseEntry::new(id, default_sets())
}

/// Entry with explicit sets.
pub fn entry_with_sets(id: &str, sets: &[&str]) -> PlanExerciseEntry {
    PlanExerciseEntry::new(id, sets.iter().map(|s| SetValue::from(*s)).collect())
}

/// Day of standalone entries with default sets.
pub fn day(name: &str, ids: &[&str]) -> TrainingDay {
    TrainingDay::with_exercises(name, ids.iter().map(|id| entry(id)).collect())
}

/// Ids of the top-level entries, in order.
pub fn top_level_ids(exercises: &[PlanExerciseEntry]) -> Vec<&str> {
    exercises.iter().map(|e| e.exercise_id.as_str()).collect()
}

/// January 2024 plan with an empty "Upper" day and a "Lower" day holding
/// `squat` and `lunge`.
pub fn sample_plan() -> Plan {
    let mut plan = PlanDraft::new(date(2024, 1, 1), date(2024, 1, 31))
        .day("Upper")
        .build();
    plan.trainings.push(day("Lower", &["squat", "lunge"]));
    plan
}

/// Two customers with fixed ids: `c-ann` whose plan ended on 2024-01-09 and
/// `c-bob` who never had one.
pub fn sample_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: "c-ann".to_owned(),
            first_name: "Ann".to_owned(),
            last_name: "Archer".to_owned(),
            phone_number: "+1 555 0101".to_owned(),
            last_plan_end_date: Some(utc(2024, 1, 9)),
        },
        Customer {
            id: "c-bob".to_owned(),
            first_name: "Bob".to_owned(),
            last_name: "Baker".to_owned(),
            phone_number: "+1 555 0102".to_owned(),
            last_plan_end_date: None,
        },
    ]
}

/// Create a temporary data directory seeded with [`sample_catalog`] and
/// [`sample_customers`].
///
/// Returns `(dir, backend)`. Keep `dir` alive for the duration of the test.
pub fn create_test_data_dir() -> (TempDir, DirectoryBackend) {
    let dir = TempDir::new().expect("failed to create temp data dir");
    let backend = DirectoryBackend::new(dir.path());
    backend
        .write_catalog(&sample_catalog())
        .expect("failed to seed catalog");
    let customers =
        serde_json::to_string_pretty(&sample_customers()).expect("failed to serialize customers");
    std::fs::write(backend.customers_path(), customers).expect("failed to seed customers");
    (dir, backend)
}
