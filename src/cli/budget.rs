//! Budget CLI commands
//!
//! Category budgets live on the backend, which also computes how much of
//! each has been spent. These commands create, list and delete them and
//! surface the threshold alerts.

use clap::Subcommand;

use super::{load, parse_money};
use crate::api::FinanceApi;
use crate::display::{format_alerts, format_budget_list};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{find_labelled, BudgetId, Money, NewBudget, PeriodType};
use crate::services;
use crate::state::{AppState, Collection};

fn parse_period_type(s: &str) -> Result<PeriodType, String> {
    PeriodType::parse(s).ok_or_else(|| {
        format!(
            "unknown period '{}', use weekly, monthly, quarterly, yearly or custom",
            s
        )
    })
}

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget for a category
    Add {
        /// Budget name
        name: String,
        /// Spending limit (e.g., "300")
        #[arg(value_parser = parse_money)]
        limit: Money,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Alert when this percentage of the limit is spent
        #[arg(short, long, default_value_t = crate::models::DEFAULT_NOTIFICATION_THRESHOLD)]
        threshold: u8,
        /// Budget period
        #[arg(short, long, default_value = "monthly", value_parser = parse_period_type)]
        period: PeriodType,
    },

    /// List budgets with progress and status
    List,

    /// Delete a budget by ID
    Delete {
        /// Budget ID
        id: i64,
    },

    /// Show budgets that are near or over their limit
    Alerts,
}

/// Handle a budget command
pub async fn handle_budget_command<A: FinanceApi>(
    state: &mut AppState<A>,
    cmd: BudgetCommands,
) -> FinboardResult<()> {
    let currency = state.settings().currency_symbol.clone();

    match cmd {
        BudgetCommands::Add {
            name,
            limit,
            category,
            threshold,
            period,
        } => {
            load(state, &[Collection::Categories]).await?;
            let category_id = find_labelled(&state.snapshot().categories, &category)
                .map(|c| c.id)
                .ok_or_else(|| FinboardError::unresolved_category(&category))?;

            let mut budget = NewBudget::new(name, limit, category_id);
            budget.notification_threshold = threshold;
            budget.period_type = period;

            let created = state.add_budget(budget).await?;
            println!(
                "Created budget {}: {} ({} {})",
                created.id,
                created.name,
                created.budget_limit.format_with_symbol(&currency),
                created.period_type
            );
        }

        BudgetCommands::List => {
            load(state, &[Collection::Budgets]).await?;
            print!("{}", format_budget_list(&state.budget_views(), &currency));
        }

        BudgetCommands::Delete { id } => {
            let id = BudgetId::new(id);
            state.delete_budget(id).await?;
            println!("Deleted budget {}", id);
        }

        BudgetCommands::Alerts => {
            load(state, &[Collection::Budgets]).await?;
            let views = state.budget_views();
            print!("{}", format_alerts(&services::alerts(&views), &currency));
        }
    }

    Ok(())
}
