//! Plan-editing engine for the coachplan workspace.
//!
//! Training plans are nested values (plan -> training days -> exercise
//! entries -> superset members) edited through pure functions. The crate also
//! indexes the exercise catalog, derives a customer's plan status, and owns
//! the application state that sits between an editor and the backend.

pub mod backend;
pub mod catalog;
pub mod model;
pub mod payload;
pub mod plan;
pub mod state;
pub mod status;

pub use catalog::{CatalogError, CatalogIndex, MuscleGroup, load_catalog_json};
pub use model::{
    Customer, ExerciseDefinition, Macros, NewCustomer, Plan, PlanExerciseEntry, SetSequence,
    SetValue, TrainingDay,
};
pub use status::{PlanStatus, StatusReport, derive_status};
