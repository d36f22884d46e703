use chrono::NaiveDate;

use crate::model::{Macros, Plan, TrainingDay};

/// Builder for a new plan draft.
///
/// Use [`PlanDraft::new`] for the date range, then chain optional setters
/// before calling [`PlanDraft::build`].
#[derive(Debug, Clone)]
pub struct PlanDraft {
    start_date: NaiveDate,
    end_date: NaiveDate,
    days: Vec<String>,
    notes: String,
    set_rest_seconds: u32,
    exercise_rest_seconds: u32,
    different_rest_on_off_days: bool,
    diets: Vec<Macros>,
}

impl PlanDraft {
    /// Rest between sets when none is configured, in seconds.
    pub const DEFAULT_SET_REST_SECONDS: u32 = 60;
    /// Rest between exercises when none is configured, in seconds.
    pub const DEFAULT_EXERCISE_REST_SECONDS: u32 = 120;

    /// Create a draft covering `start_date..=end_date`.
    ///
    /// Optional fields start out as:
    /// - no training days and no diets
    /// - empty notes
    /// - [`Self::DEFAULT_SET_REST_SECONDS`] / [`Self::DEFAULT_EXERCISE_REST_SECONDS`]
    /// - the same rest on training and rest days
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            days: Vec::new(),
            notes: String::new(),
            set_rest_seconds: Self::DEFAULT_SET_REST_SECONDS,
            exercise_rest_seconds: Self::DEFAULT_EXERCISE_REST_SECONDS,
            different_rest_on_off_days: false,
            diets: Vec::new(),
        }
    }

    /// Append an empty training day.
    pub fn day(mut self, name: impl Into<String>) -> Self {
        self.days.push(name.into());
        self
    }

    /// Set the notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set rest periods between sets and between exercises.
    pub fn rest(mut self, set_seconds: u32, exercise_seconds: u32) -> Self {
        self.set_rest_seconds = set_seconds;
        self.exercise_rest_seconds = exercise_seconds;
        self
    }

    /// Use different rest periods on training and rest days.
    pub fn different_rest_on_off_days(mut self, enabled: bool) -> Self {
        self.different_rest_on_off_days = enabled;
        self
    }

    /// Append a diet.
    pub fn diet(mut self, macros: Macros) -> Self {
        self.diets.push(macros);
        self
    }

    pub fn build(self) -> Plan {
        Plan {
            start_date: self.start_date,
            end_date: self.end_date,
            trainings: self.days.into_iter().map(TrainingDay::new).collect(),
            notes: self.notes,
            set_rest_seconds: self.set_rest_seconds,
            exercise_rest_seconds: self.exercise_rest_seconds,
            different_rest_on_off_days: self.different_rest_on_off_days,
            diets: self.diets,
        }
    }
}
