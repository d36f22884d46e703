//! Exercise catalog index.
//!
//! The backend serves the catalog as one flat list. Selection screens want it
//! grouped by muscle group, and renderers need id -> definition lookups.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::warn;

use crate::model::ExerciseDefinition;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Definitions sharing one muscle group, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleGroup {
    pub name: String,
    pub exercises: Vec<ExerciseDefinition>,
}

/// Catalog grouped by muscle group.
///
/// Both the group order and the order of definitions inside a group follow
/// the order of the source list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogIndex {
    groups: Vec<MuscleGroup>,
}

impl CatalogIndex {
    /// Group a flat list of definitions by muscle group.
    pub fn build(definitions: impl IntoIterator<Item = ExerciseDefinition>) -> Self {
        let mut groups: Vec<MuscleGroup> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for def in definitions {
            if !seen_ids.insert(def.id.clone()) {
                warn!(exercise_id = %def.id, "duplicate exercise id in catalog, first one wins on lookup");
            }
            let pos = match positions.get(&def.muscle_group) {
                Some(&pos) => pos,
                None => {
                    groups.push(MuscleGroup {
                        name: def.muscle_group.clone(),
                        exercises: Vec::new(),
                    });
                    positions.insert(def.muscle_group.clone(), groups.len() - 1);
                    groups.len() - 1
                }
            };
            groups[pos].exercises.push(def);
        }

        Self { groups }
    }

    /// Find a definition by id.
    ///
    /// Linear in the size of the catalog, which stays in the low hundreds.
    pub fn find_by_id(&self, id: &str) -> Option<&ExerciseDefinition> {
        self.iter().find(|def| def.id == id)
    }

    /// Display name for `id`, if the catalog knows it.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.find_by_id(id).map(|def| def.name.as_str())
    }

    /// Groups in first-seen order.
    pub fn groups(&self) -> &[MuscleGroup] {
        &self.groups
    }

    /// The group named `name`.
    pub fn group(&self, name: &str) -> Option<&MuscleGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// All definitions, group by group.
    pub fn iter(&self) -> impl Iterator<Item = &ExerciseDefinition> {
        self.groups.iter().flat_map(|g| g.exercises.iter())
    }

    /// Total number of definitions.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.exercises.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Parse a flat JSON array of definitions and index it.
pub fn load_catalog_json(content: &str) -> Result<CatalogIndex, CatalogError> {
    let definitions: Vec<ExerciseDefinition> = serde_json::from_str(content)?;
    Ok(CatalogIndex::build(definitions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: &str, group: &str) -> ExerciseDefinition {
        ExerciseDefinition::new(id, group, format!("Exercise {id}"))
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let index = CatalogIndex::build(vec![def("1", "legs"), def("2", "arms"), def("3", "legs")]);

        let names: Vec<&str> = index.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["legs", "arms"]);

        let legs: Vec<&str> = index
            .group("legs")
            .unwrap()
            .exercises
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(legs, vec!["1", "3"]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn find_by_id_hits_and_misses() {
        let index = CatalogIndex::build(vec![def("1", "legs"), def("2", "arms")]);
        assert_eq!(index.find_by_id("2").map(|d| d.muscle_group.as_str()), Some("arms"));
        assert_eq!(index.name_of("1"), Some("Exercise 1"));
        assert!(index.find_by_id("99").is_none());
    }

    #[test]
    fn duplicate_ids_first_wins() {
        let index = CatalogIndex::build(vec![
            ExerciseDefinition::new("1", "legs", "Squat"),
            ExerciseDefinition::new("1", "arms", "Curl"),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.name_of("1"), Some("Squat"));
    }

    #[test]
    fn empty_catalog() {
        let index = CatalogIndex::build(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.find_by_id("1").is_none());
    }

    #[test]
    fn load_from_server_json() {
        let json = r#"[
            {"id": "sq", "muscleGroup": "legs", "name": "Back Squat"},
            {"id": "bp", "muscleGroup": "chest", "name": "Bench Press"}
        ]"#;
        let index = load_catalog_json(json).expect("should parse");
        assert_eq!(index.groups().len(), 2);
        assert_eq!(index.name_of("bp"), Some("Bench Press"));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let err = load_catalog_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)), "got: {err}");
    }
}
