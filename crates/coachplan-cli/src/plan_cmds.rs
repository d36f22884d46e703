//! CLI handlers for `coachplan plan` subcommands.
//!
//! Implements:
//! - `coachplan plan new <file>`         -- write a plan file with empty days
//! - `coachplan plan show <file>`        -- numbered per-day view
//! - `coachplan plan validate <file>`    -- parse, validate, check the catalog
//! - `coachplan plan edit <file> <edit>` -- apply one edit and write back
//! - `coachplan plan submit <file>`      -- store the plan for a customer
//! - `coachplan plan export <file>`      -- print the JSON payload

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use coachplan_core::backend::{CoachBackend, DirectoryBackend};
use coachplan_core::catalog::CatalogIndex;
use coachplan_core::model::{Macros, Plan, SetValue};
use coachplan_core::payload::plan_payload_json;
use coachplan_core::plan::{
    EditAction, PlanDraft, RowRole, apply_edit, catalog_warnings, flatten_numbering,
    parse_plan_toml, quantity, render_plan_toml,
};
use coachplan_core::state::CoachState;

use crate::config::CoachConfig;
use crate::{EditCommands, PlanCommands};

// -----------------------------------------------------------------------
// Public entry point
// -----------------------------------------------------------------------

/// Dispatch a `PlanCommands` variant to the appropriate handler.
pub fn run_plan_command(command: PlanCommands, config: &CoachConfig) -> Result<()> {
    let backend = DirectoryBackend::new(&config.data_dir);
    match command {
        PlanCommands::New {
            file,
            start,
            end,
            days,
            force,
        } => {
            let mut draft = PlanDraft::new(start, end)
                .rest(config.set_rest_seconds, config.exercise_rest_seconds);
            for day in days {
                draft = draft.day(day);
            }
            cmd_new(&file, draft.build(), force)
        }
        PlanCommands::Show { file } => cmd_show(&backend, &file),
        PlanCommands::Validate { file } => cmd_validate(&backend, &file),
        PlanCommands::Edit { file, action } => cmd_edit(&backend, &file, action),
        PlanCommands::Submit { file, customer } => cmd_submit(backend, &file, &customer),
        PlanCommands::Export { file, output } => cmd_export(&file, output.as_deref()),
    }
}

// -----------------------------------------------------------------------
// File helpers
// -----------------------------------------------------------------------

fn read_plan(path: &Path) -> Result<Plan> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan file: {}", path.display()))?;
    parse_plan_toml(&content)
        .with_context(|| format!("failed to parse plan file: {}", path.display()))
}

fn write_plan(path: &Path, plan: &Plan) -> Result<()> {
    let content = render_plan_toml(plan).context("failed to serialize plan")?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write plan file: {}", path.display()))
}

fn load_catalog(backend: &DirectoryBackend) -> Result<CatalogIndex> {
    let definitions = backend.exercises().with_context(|| {
        format!(
            "failed to load exercise catalog from {}",
            backend.catalog_path().display()
        )
    })?;
    Ok(CatalogIndex::build(definitions))
}

// -----------------------------------------------------------------------
// coachplan plan new <file>
// -----------------------------------------------------------------------

fn cmd_new(path: &Path, plan: Plan, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "plan file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }
    // Validates dates and day names before anything is written.
    let content = render_plan_toml(&plan).context("failed to serialize plan")?;
    parse_plan_toml(&content).context("invalid plan")?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write plan file: {}", path.display()))?;

    println!("Plan written to {}", path.display());
    println!(
        "  {} to {} ({} days), {} training days",
        plan.start_date,
        plan.end_date,
        plan.duration_days(),
        plan.trainings.len()
    );
    Ok(())
}

// -----------------------------------------------------------------------
// coachplan plan show <file>
// -----------------------------------------------------------------------

fn cmd_show(backend: &DirectoryBackend, path: &Path) -> Result<()> {
    let plan = read_plan(path)?;
    let catalog = load_catalog(backend)?;

    println!(
        "Plan: {} to {} ({} days)",
        plan.start_date,
        plan.end_date,
        plan.duration_days()
    );
    println!(
        "Rest: {}s between sets, {}s between exercises{}",
        plan.set_rest_seconds,
        plan.exercise_rest_seconds,
        if plan.different_rest_on_off_days {
            ", different on rest days"
        } else {
            ""
        }
    );

    for (i, day) in plan.trainings.iter().enumerate() {
        println!();
        println!("Day {}: {} ({} exercises)", i + 1, day.name, quantity(day));
        let rows = flatten_numbering(day, &catalog);
        if rows.is_empty() {
            println!("  (no exercises)");
        }
        for row in &rows {
            let marker = match row.role {
                RowRole::Standalone => " ",
                RowRole::Anchor => "┌",
                RowRole::Member if row.is_last_in_group => "└",
                RowRole::Member => "│",
            };
            let sets = row
                .sets
                .map(|sets| {
                    let reps: Vec<String> = sets.iter().map(ToString::to_string).collect();
                    format!("  {}", reps.join(" / "))
                })
                .unwrap_or_default();
            println!("  {marker} {:>2}. {} [{}]{sets}", row.number, row.label(), row.exercise_id);
        }
    }

    if !plan.diets.is_empty() {
        println!();
        println!("Diets:");
        for (i, macros) in plan.diets.iter().enumerate() {
            println!(
                "  {}. P {}g / F {}g / C {}g = {} kcal",
                i + 1,
                macros.proteins,
                macros.fats,
                macros.carbs,
                macros.calories()
            );
        }
    }

    if !plan.notes.is_empty() {
        println!();
        println!("Notes:");
        for line in plan.notes.lines() {
            println!("  {line}");
        }
    }

    Ok(())
}

// -----------------------------------------------------------------------
// coachplan plan validate <file>
// -----------------------------------------------------------------------

fn cmd_validate(backend: &DirectoryBackend, path: &Path) -> Result<()> {
    let plan = read_plan(path)?;
    let catalog = load_catalog(backend)?;

    let exercises: usize = plan.trainings.iter().map(quantity).sum();
    println!("Plan is valid.");
    println!("  Training days: {}", plan.trainings.len());
    println!("  Exercises:     {exercises}");
    println!("  Diets:         {}", plan.diets.len());

    let warnings = catalog_warnings(&plan, &catalog);
    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for w in &warnings {
            println!("  - {w}");
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------
// coachplan plan edit <file> <edit>
// -----------------------------------------------------------------------

fn cmd_edit(backend: &DirectoryBackend, path: &Path, edit: EditCommands) -> Result<()> {
    let plan = read_plan(path)?;
    let catalog = load_catalog(backend)?;
    let action = to_edit_action(edit)?;

    let next = apply_edit(&plan, &action, &catalog)
        .with_context(|| format!("cannot apply edit to {}", path.display()))?;
    if next == plan {
        println!("No change.");
        return Ok(());
    }
    write_plan(path, &next)?;
    info!(file = %path.display(), ?action, "plan edited");
    println!("Plan updated: {}", path.display());
    Ok(())
}

/// Translate 1-based CLI numbers into an [`EditAction`].
fn to_edit_action(edit: EditCommands) -> Result<EditAction> {
    let action = match edit {
        EditCommands::AddDay { name } => EditAction::AddDay { name },
        EditCommands::RenameDay { day, name } => EditAction::RenameDay {
            day: zero_based(day, "day")?,
            name,
        },
        EditCommands::RemoveDay { day } => EditAction::RemoveDay {
            day: zero_based(day, "day")?,
        },
        EditCommands::Toggle { day, exercise } => EditAction::ToggleExercise {
            day: zero_based(day, "day")?,
            exercise_id: exercise,
        },
        EditCommands::SetSets {
            day,
            exercise,
            sets,
        } => EditAction::SetSets {
            day: zero_based(day, "day")?,
            exercise_id: exercise,
            sets: sets.iter().map(|s| SetValue::from(s.trim())).collect(),
        },
        EditCommands::AddSet {
            day,
            exercise,
            reps,
        } => EditAction::AddSet {
            day: zero_based(day, "day")?,
            exercise_id: exercise,
            value: SetValue::from(reps),
        },
        EditCommands::EditSet {
            day,
            exercise,
            set,
            reps,
        } => EditAction::EditSet {
            day: zero_based(day, "day")?,
            exercise_id: exercise,
            index: zero_based(set, "set")?,
            value: SetValue::from(reps),
        },
        EditCommands::RemoveSet { day, exercise, set } => EditAction::RemoveSet {
            day: zero_based(day, "day")?,
            exercise_id: exercise,
            index: zero_based(set, "set")?,
        },
        EditCommands::Merge { day, exercises } => EditAction::MergeSuperset {
            day: zero_based(day, "day")?,
            exercise_ids: exercises,
        },
        EditCommands::Split { day, exercises } => EditAction::SplitSuperset {
            day: zero_based(day, "day")?,
            exercise_ids: exercises,
        },
        EditCommands::Notes { text } => EditAction::SetNotes { notes: text },
        EditCommands::Rest {
            set_seconds,
            exercise_seconds,
        } => EditAction::SetRest {
            set_seconds,
            exercise_seconds,
        },
        EditCommands::DifferentRest { enabled } => {
            EditAction::SetDifferentRestOnOffDays { enabled }
        }
        EditCommands::AddDiet {
            proteins,
            fats,
            carbs,
        } => EditAction::AddDiet {
            macros: Macros::new(proteins, fats, carbs),
        },
        EditCommands::SetDiet {
            diet,
            proteins,
            fats,
            carbs,
        } => EditAction::SetDiet {
            index: zero_based(diet, "diet")?,
            macros: Macros::new(proteins, fats, carbs),
        },
        EditCommands::RemoveDiet { diet } => EditAction::RemoveDiet {
            index: zero_based(diet, "diet")?,
        },
        EditCommands::Dates { start, end } => EditAction::SetDates { start, end },
    };
    Ok(action)
}

fn zero_based(n: usize, what: &str) -> Result<usize> {
    match n.checked_sub(1) {
        Some(i) => Ok(i),
        None => bail!("{what} numbers start at 1"),
    }
}

// -----------------------------------------------------------------------
// coachplan plan submit <file> --customer <id>
// -----------------------------------------------------------------------

fn cmd_submit(backend: DirectoryBackend, path: &Path, customer_id: &str) -> Result<()> {
    let plan = read_plan(path)?;
    let mut state = CoachState::load(backend).context("failed to load coach data")?;

    let warnings = catalog_warnings(&plan, state.catalog());
    state.open_draft(customer_id, plan)?;
    let record = state
        .submit_draft(customer_id)
        .with_context(|| format!("failed to submit plan for customer {customer_id}"))?;

    let name = state
        .customer(customer_id)
        .map(|c| c.full_name())
        .unwrap_or_else(|| customer_id.to_owned());
    println!("Plan submitted.");
    println!();
    println!("  Plan ID:  {}", record.id);
    println!("  Customer: {name}");
    println!(
        "  Period:   {} to {}",
        record.plan.start_date, record.plan.end_date
    );
    println!(
        "  Stored:   {}",
        state.backend().plans_path(customer_id).display()
    );

    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for w in &warnings {
            println!("  - {w}");
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------
// coachplan plan export <file>
// -----------------------------------------------------------------------

fn cmd_export(path: &Path, output: Option<&Path>) -> Result<()> {
    let plan = read_plan(path)?;
    let json = plan_payload_json(&plan).context("failed to serialize plan payload")?;

    match output {
        Some(out) => {
            std::fs::write(out, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Payload written to {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
