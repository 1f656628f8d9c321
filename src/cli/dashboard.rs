//! Dashboard and allocation commands

use clap::Subcommand;

use crate::api::FinanceApi;
use crate::display::{format_alerts, format_allocation, format_monthly_budget};
use crate::error::FinboardResult;
use crate::services::{self, parse_or_current};
use crate::state::{AppState, Collection};

/// Allocation subcommands
#[derive(Subcommand)]
pub enum AllocationCommands {
    /// Show the current bucket percentages
    Show,

    /// Set all four bucket percentages (must sum to 100)
    Set {
        /// Essentials percentage
        essentials: f64,
        /// Growth percentage
        growth: f64,
        /// Emergency percentage
        emergency: f64,
        /// Leisure percentage
        leisure: f64,
    },

    /// Restore the 50/25/15/10 split
    Reset,
}

/// Bucket budget and budget alerts for one month
pub async fn handle_dashboard_command<A: FinanceApi>(
    state: &mut AppState<A>,
    period: Option<&str>,
) -> FinboardResult<()> {
    let period = parse_or_current(period, services::period::today())?;
    state.set_reference_date(period.start_date());
    super::load(state, &Collection::ALL).await?;

    let currency = state.settings().currency_symbol.clone();
    if let Some(session) = state.session() {
        println!("Welcome, {}!\n", session.user.display_name());
    }
    print!("{}", format_monthly_budget(state.monthly_budget(), &currency));
    println!();

    let views = state.budget_views();
    print!("{}", format_alerts(&services::alerts(&views), &currency));
    Ok(())
}

/// Allocation commands work offline; only the local store is touched
pub fn handle_allocation_command<A: FinanceApi>(
    state: &mut AppState<A>,
    cmd: AllocationCommands,
) -> FinboardResult<()> {
    match cmd {
        AllocationCommands::Show => {
            print!("{}", format_allocation(state.allocation()));
        }
        AllocationCommands::Set {
            essentials,
            growth,
            emergency,
            leisure,
        } => {
            state.set_allocation(essentials, growth, emergency, leisure)?;
            println!("Allocation saved.");
            print!("{}", format_allocation(state.allocation()));
        }
        AllocationCommands::Reset => {
            let defaults = crate::models::AllocationPercentages::default();
            state.set_allocation(
                defaults.essentials,
                defaults.growth,
                defaults.emergency,
                defaults.leisure,
            )?;
            println!("Allocation reset to defaults.");
            print!("{}", format_allocation(state.allocation()));
        }
    }
    Ok(())
}
