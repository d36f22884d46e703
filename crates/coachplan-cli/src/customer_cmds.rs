//! CLI handlers for `coachplan customer` subcommands.
//!
//! Implements:
//! - `coachplan customer add --first --last --phone` -- register a customer
//! - `coachplan customer list`                       -- list all customers

use anyhow::{Context, Result, bail};

use coachplan_core::backend::DirectoryBackend;
use coachplan_core::model::NewCustomer;
use coachplan_core::state::CoachState;

use crate::CustomerCommands;

/// Dispatch a `CustomerCommands` variant to the appropriate handler.
pub fn run_customer_command(command: CustomerCommands, backend: DirectoryBackend) -> Result<()> {
    let mut state = CoachState::load(backend).context("failed to load coach data")?;
    match command {
        CustomerCommands::Add { first, last, phone } => cmd_add(&mut state, first, last, phone),
        CustomerCommands::List => {
            cmd_list(&state);
            Ok(())
        }
    }
}

fn cmd_add(
    state: &mut CoachState<DirectoryBackend>,
    first: String,
    last: String,
    phone: String,
) -> Result<()> {
    if first.trim().is_empty() || last.trim().is_empty() {
        bail!("first and last name must not be empty");
    }
    let customer = state
        .add_customer(NewCustomer {
            first_name: first.trim().to_owned(),
            last_name: last.trim().to_owned(),
            phone_number: phone.trim().to_owned(),
        })
        .context("failed to create customer")?;

    println!("Customer created.");
    println!();
    println!("  ID:    {}", customer.id);
    println!("  Name:  {}", customer.full_name());
    println!("  Phone: {}", customer.phone_number);
    Ok(())
}

fn cmd_list(state: &CoachState<DirectoryBackend>) {
    let customers = state.customers();
    if customers.is_empty() {
        println!("No customers found. Use `coachplan customer add` to create one.");
        return;
    }

    let id_w = customers.iter().map(|c| c.id.len()).max().unwrap_or(2).max(2);
    let name_w = customers
        .iter()
        .map(|c| c.full_name().len())
        .max()
        .unwrap_or(4)
        .max(4);
    let phone_w = customers
        .iter()
        .map(|c| c.phone_number.len())
        .max()
        .unwrap_or(5)
        .max(5);

    println!(
        "{:<id_w$}  {:<name_w$}  {:<phone_w$}  LAST PLAN END",
        "ID", "NAME", "PHONE"
    );
    for c in customers {
        let end = c
            .last_plan_end_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_owned());
        println!(
            "{:<id_w$}  {:<name_w$}  {:<phone_w$}  {}",
            c.id,
            c.full_name(),
            c.phone_number,
            end
        );
    }
}
