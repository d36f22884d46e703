//! Plan editing: pure mutations, numbering, the typed edit reducer, drafts,
//! and the TOML file format.

pub mod draft;
pub mod edit;
pub mod file_format;
pub mod mutate;
pub mod numbering;
pub mod parser;

pub use draft::PlanDraft;
pub use edit::{EditAction, EditError, apply_edit};
pub use file_format::{DayFile, EntryFile, PlanFile, PlanMeta};
pub use mutate::{
    DEFAULT_REPS, DEFAULT_SET_COUNT, add_or_update_exercise, default_sets, merge_into_superset,
    replace_exercises_for_day, split_from_superset,
};
pub use numbering::{NumberedRow, RowRole, flatten_numbering, quantity};
pub use parser::{PlanParseError, catalog_warnings, parse_plan_toml, render_plan_toml, validate_plan};
