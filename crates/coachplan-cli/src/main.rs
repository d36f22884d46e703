mod catalog_cmd;
mod config;
mod customer_cmds;
mod plan_cmds;
mod status_cmd;
#[cfg(test)]
mod test_util;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use coachplan_core::backend::DirectoryBackend;

use config::CoachConfig;

#[derive(Parser)]
#[command(name = "coachplan", version, about = "Training and nutrition plan editor for coaches")]
struct Cli {
    /// Data directory (overrides COACHPLAN_DATA_DIR env var)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a coachplan config file and create the data directory
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// List the exercise catalog grouped by muscle group
    Catalog {
        /// Only show this muscle group
        #[arg(long)]
        group: Option<String>,
    },
    /// Customer management
    Customer {
        #[command(subcommand)]
        command: CustomerCommands,
    },
    /// Show the plan status of every customer, most urgent first
    Status {
        /// Evaluate as of this instant (RFC 3339, defaults to now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Plan file management
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Register a new customer
    Add {
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        #[arg(long)]
        phone: String,
    },
    /// List all customers
    List,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Write a new plan file with empty training days
    New {
        /// Path of the plan TOML file to create
        file: PathBuf,
        /// First day of the plan (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the plan (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Training day name; repeat for several days
        #[arg(long = "day")]
        days: Vec<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show a plan with numbered exercises per day
    Show {
        /// Path to the plan TOML file
        file: PathBuf,
    },
    /// Parse and validate a plan file
    Validate {
        /// Path to the plan TOML file
        file: PathBuf,
    },
    /// Apply one edit to a plan file and write it back
    Edit {
        /// Path to the plan TOML file
        file: PathBuf,
        #[command(subcommand)]
        action: EditCommands,
    },
    /// Submit a plan for a customer
    Submit {
        /// Path to the plan TOML file
        file: PathBuf,
        /// Customer ID
        #[arg(long)]
        customer: String,
    },
    /// Export a plan as the JSON payload sent to the server
    Export {
        /// Path to the plan TOML file
        file: PathBuf,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Edits accepted by `plan edit`. Day, set and diet numbers are 1-based, as
/// printed by `plan show`.
#[derive(Subcommand)]
pub enum EditCommands {
    /// Append an empty training day
    AddDay { name: String },
    /// Rename a training day
    RenameDay { day: usize, name: String },
    /// Remove a training day
    RemoveDay { day: usize },
    /// Add an exercise to a day, or remove it if already there
    Toggle { day: usize, exercise: String },
    /// Replace all sets of an exercise (comma-separated reps)
    SetSets {
        day: usize,
        exercise: String,
        #[arg(value_delimiter = ',', required = true)]
        sets: Vec<String>,
    },
    /// Append a set to an exercise
    AddSet { day: usize, exercise: String, reps: String },
    /// Change the reps of one set
    EditSet {
        day: usize,
        exercise: String,
        set: usize,
        reps: String,
    },
    /// Remove one set of an exercise
    RemoveSet { day: usize, exercise: String, set: usize },
    /// Group exercises into a superset under the first one in day order
    Merge {
        day: usize,
        #[arg(num_args = 2.., required = true)]
        exercises: Vec<String>,
    },
    /// Take exercises out of their superset and remove them from the day
    Split {
        day: usize,
        #[arg(num_args = 1.., required = true)]
        exercises: Vec<String>,
    },
    /// Replace the plan notes
    Notes { text: String },
    /// Set rest between sets and between exercises, in seconds
    Rest { set_seconds: u32, exercise_seconds: u32 },
    /// Use different rest on training and rest days
    DifferentRest {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Append a diet (grams of protein, fat, carbohydrate)
    AddDiet { proteins: u32, fats: u32, carbs: u32 },
    /// Replace a diet
    SetDiet {
        diet: usize,
        proteins: u32,
        fats: u32,
        carbs: u32,
    },
    /// Remove a diet
    RemoveDiet { diet: usize },
    /// Change the plan dates
    Dates { start: NaiveDate, end: NaiveDate },
}

/// Execute the `coachplan init` command: write config file.
fn cmd_init(cli_data_dir: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let data_dir = match cli_data_dir {
        Some(dir) => dir.to_path_buf(),
        None => config::default_data_dir()
            .context("cannot determine a data directory, pass --data-dir")?,
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let cfg = config::ConfigFile {
        data: config::DataSection {
            dir: Some(data_dir.clone()),
        },
        plan: config::PlanSection::default(),
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  data.dir = {}", data_dir.display());
    println!(
        "  plan.set_rest_seconds = {}, plan.exercise_rest_seconds = {}",
        cfg.plan.set_rest_seconds, cfg.plan.exercise_rest_seconds
    );
    println!();
    println!(
        "Next: place the exercise catalog at {}.",
        data_dir.join(DirectoryBackend::CATALOG_FILE).display()
    );

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { force } => {
            cmd_init(cli.data_dir.as_deref(), force)?;
        }
        Commands::Catalog { group } => {
            let resolved = CoachConfig::resolve(cli.data_dir.as_deref())?;
            catalog_cmd::run_catalog(&DirectoryBackend::new(resolved.data_dir), group.as_deref())?;
        }
        Commands::Customer { command } => {
            let resolved = CoachConfig::resolve(cli.data_dir.as_deref())?;
            customer_cmds::run_customer_command(command, DirectoryBackend::new(resolved.data_dir))?;
        }
        Commands::Status { now } => {
            let resolved = CoachConfig::resolve(cli.data_dir.as_deref())?;
            status_cmd::run_status(
                DirectoryBackend::new(resolved.data_dir),
                now.unwrap_or_else(Utc::now),
            )?;
        }
        Commands::Plan { command } => {
            let resolved = CoachConfig::resolve(cli.data_dir.as_deref())?;
            plan_cmds::run_plan_command(command, &resolved)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "coachplan", &mut std::io::stdout());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn set_sets_splits_on_commas() {
        let cli = Cli::try_parse_from([
            "coachplan", "plan", "edit", "p.toml", "set-sets", "1", "squat", "5,5,3",
        ])
        .unwrap();
        let Commands::Plan {
            command: PlanCommands::Edit {
                action: EditCommands::SetSets { sets, .. },
                ..
            },
        } = cli.command
        else {
            panic!("unexpected parse");
        };
        assert_eq!(sets, vec!["5", "5", "3"]);
    }

    #[test]
    fn merge_requires_two_exercises() {
        let result = Cli::try_parse_from(["coachplan", "plan", "edit", "p.toml", "merge", "1", "squat"]);
        assert!(result.is_err());
    }
}
