//! `coachplan catalog` command: list exercises grouped by muscle group.

use anyhow::{Context, Result, bail};

use coachplan_core::backend::{CoachBackend, DirectoryBackend};
use coachplan_core::catalog::{CatalogIndex, MuscleGroup};

/// Run the catalog command, optionally restricted to one muscle group.
pub fn run_catalog(backend: &DirectoryBackend, group: Option<&str>) -> Result<()> {
    let definitions = backend.exercises().with_context(|| {
        format!(
            "failed to load exercise catalog from {}",
            backend.catalog_path().display()
        )
    })?;
    let index = CatalogIndex::build(definitions);

    if index.is_empty() {
        println!(
            "Catalog is empty. Place a JSON exercise list at {}.",
            backend.catalog_path().display()
        );
        return Ok(());
    }

    match group {
        Some(name) => match index.group(name) {
            Some(g) => print_group(g),
            None => {
                let known: Vec<&str> = index.groups().iter().map(|g| g.name.as_str()).collect();
                bail!("unknown muscle group {name:?} (known: {})", known.join(", "));
            }
        },
        None => {
            for (i, g) in index.groups().iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_group(g);
            }
        }
    }

    Ok(())
}

fn print_group(group: &MuscleGroup) {
    println!("{} ({})", group.name, group.exercises.len());
    let id_w = group
        .exercises
        .iter()
        .map(|e| e.id.len())
        .max()
        .unwrap_or(2);
    for def in &group.exercises {
        println!("  {:<id_w$}  {}", def.id, def.name);
    }
}
