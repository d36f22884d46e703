//! Flattened, numbered view of a training day.
//!
//! A superset anchor and its members are numbered consecutively, and the
//! exercise count of a day includes every member.

use crate::catalog::CatalogIndex;
use crate::model::{SetValue, TrainingDay};

/// Position of a row inside its visual group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    /// An entry with no superset members.
    Standalone,
    /// The entry that owns a superset.
    Anchor,
    /// A superset member, rendered under its anchor.
    Member,
}

/// One rendered exercise row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedRow<'a> {
    /// 1-based position within the day.
    pub number: usize,
    pub exercise_id: &'a str,
    /// Catalog name, `None` when the catalog has no such id.
    pub name: Option<&'a str>,
    pub role: RowRole,
    /// Sets of the entry; members have none of their own.
    pub sets: Option<&'a [SetValue]>,
    /// Last row of its superset group, or last row of the day. Renderers
    /// skip the trailing divider for these rows.
    pub is_last_in_group: bool,
}

impl NumberedRow<'_> {
    /// Catalog name, falling back to the raw exercise id.
    pub fn label(&self) -> &str {
        self.name.unwrap_or(self.exercise_id)
    }
}

/// Number of exercises in a day, counting superset members individually.
pub fn quantity(day: &TrainingDay) -> usize {
    day.exercises
        .iter()
        .map(|e| 1 + e.superset_exercise_ids.len())
        .sum()
}

/// Flatten a day into numbered rows: each entry, then its members.
pub fn flatten_numbering<'a>(day: &'a TrainingDay, catalog: &'a CatalogIndex) -> Vec<NumberedRow<'a>> {
    let total = quantity(day);
    let mut rows = Vec::with_capacity(total);

    for entry in &day.exercises {
        let role = if entry.is_anchor() {
            RowRole::Anchor
        } else {
            RowRole::Standalone
        };
        let number = rows.len() + 1;
        rows.push(NumberedRow {
            number,
            exercise_id: entry.exercise_id.as_str(),
            name: catalog.name_of(&entry.exercise_id),
            role,
            sets: Some(entry.sets.as_slice()),
            is_last_in_group: role == RowRole::Standalone && number == total,
        });

        let member_count = entry.superset_exercise_ids.len();
        for (i, member) in entry.superset_exercise_ids.iter().enumerate() {
            rows.push(NumberedRow {
                number: rows.len() + 1,
                exercise_id: member.as_str(),
                name: catalog.name_of(member),
                role: RowRole::Member,
                sets: None,
                is_last_in_group: i + 1 == member_count,
            });
        }
    }

    rows
}
