//! `coachplan status` command: plan status of every customer.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use coachplan_core::backend::DirectoryBackend;
use coachplan_core::state::CoachState;
use coachplan_core::status::PlanStatus;

/// Print the status board as of `now`, most urgent customers first.
pub fn run_status(backend: DirectoryBackend, now: DateTime<Utc>) -> Result<()> {
    let state = CoachState::load(backend).context("failed to load coach data")?;
    let board = state.status_board(now);

    if board.is_empty() {
        println!("No customers found.");
        return Ok(());
    }

    let name_w = board
        .iter()
        .map(|(c, _)| c.full_name().len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!("{:<name_w$}  {:<12}  DETAIL", "NAME", "STATUS");
    println!("{}", "-".repeat(name_w + 34));

    for (customer, report) in &board {
        let icon = match report.status {
            PlanStatus::Expired => "X",
            PlanStatus::Warning => "!",
            PlanStatus::NoPlan => ".",
            PlanStatus::Good => "+",
        };
        println!(
            "{:<name_w$}  [{icon}] {:<8}  {}",
            customer.full_name(),
            report.status.to_string(),
            report.label
        );
    }

    Ok(())
}
