//! Expense and income commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{load, parse_date, parse_money, record_date};
use crate::api::FinanceApi;
use crate::display::{
    format_category_list, format_expense_list, format_income_categories, format_income_list,
};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{
    find_labelled, ExpenseId, IncomeId, Money, NewExpense, NewIncome, Period,
};
use crate::services::{self, period::record_in_period};
use crate::state::{AppState, Collection};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "42" or "42.50")
        #[arg(value_parser = parse_money)]
        amount: Money,
        /// What it was for
        description: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to now
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List expenses
    List {
        /// Only this month ("current", "last" or YYYY-MM)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Delete an expense by ID
    Delete {
        /// Expense ID
        id: i64,
    },

    /// List expense categories
    Categories,
}

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record a new income
    Add {
        /// Amount (e.g., "2500")
        #[arg(value_parser = parse_money)]
        amount: Money,
        /// Where it came from
        description: String,
        /// Income category name or ID
        #[arg(short, long)]
        category: String,
        /// Income date (YYYY-MM-DD), defaults to now
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// List incomes
    List {
        /// Only this month ("current", "last" or YYYY-MM)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Delete an income by ID
    Delete {
        /// Income ID
        id: i64,
    },

    /// List income categories with their totals
    Categories,
}

fn period_filter(period: Option<&str>) -> FinboardResult<Option<Period>> {
    period
        .map(|p| services::parse_or_current(Some(p), services::period::today()))
        .transpose()
}

pub async fn handle_expense_command<A: FinanceApi>(
    state: &mut AppState<A>,
    cmd: ExpenseCommands,
) -> FinboardResult<()> {
    let currency = state.settings().currency_symbol.clone();

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
            date,
            notes,
        } => {
            load(state, &[Collection::Categories]).await?;
            let category_id = find_labelled(&state.snapshot().categories, &category)
                .map(|c| c.id)
                .ok_or_else(|| FinboardError::unresolved_category(&category))?;

            let mut expense = NewExpense::new(amount, description, category_id);
            expense.expense_date = record_date(date);
            expense.notes = notes.unwrap_or_default();

            let created = state.add_expense(expense).await?;
            println!(
                "Added expense {}: {} ({})",
                created.id,
                created.description,
                created.amount.format_with_symbol(&currency)
            );
        }

        ExpenseCommands::List { period } => {
            let period = period_filter(period.as_deref())?;
            load(state, &[Collection::Categories, Collection::Expenses]).await?;

            let snapshot = state.snapshot();
            let expenses: Vec<_> = snapshot
                .expenses
                .iter()
                .filter(|e| period.map_or(true, |p| record_in_period(*e, p)))
                .cloned()
                .collect();
            print!(
                "{}",
                format_expense_list(
                    &expenses,
                    &snapshot.categories,
                    &currency,
                    &state.settings().date_format,
                )
            );
        }

        ExpenseCommands::Delete { id } => {
            let id = ExpenseId::new(id);
            state.delete_expense(id).await?;
            println!("Deleted expense {}", id);
        }

        ExpenseCommands::Categories => {
            load(state, &[Collection::Categories]).await?;
            print!("{}", format_category_list(&state.snapshot().categories));
        }
    }

    Ok(())
}

pub async fn handle_income_command<A: FinanceApi>(
    state: &mut AppState<A>,
    cmd: IncomeCommands,
) -> FinboardResult<()> {
    let currency = state.settings().currency_symbol.clone();

    match cmd {
        IncomeCommands::Add {
            amount,
            description,
            category,
            date,
        } => {
            load(state, &[Collection::IncomeCategories]).await?;
            let category_id = find_labelled(&state.snapshot().income_categories, &category)
                .map(|c| c.id)
                .ok_or_else(|| FinboardError::unresolved_category(&category))?;

            let income = NewIncome {
                amount,
                description,
                date: record_date(date),
                category_id,
            };
            let created = state.add_income(income).await?;
            println!(
                "Added income {}: {} ({})",
                created.id,
                created.description,
                created.amount.format_with_symbol(&currency)
            );
        }

        IncomeCommands::List { period } => {
            let period = period_filter(period.as_deref())?;
            load(state, &[Collection::IncomeCategories, Collection::Incomes]).await?;

            let snapshot = state.snapshot();
            let incomes: Vec<_> = snapshot
                .incomes
                .iter()
                .filter(|i| period.map_or(true, |p| record_in_period(*i, p)))
                .cloned()
                .collect();
            print!(
                "{}",
                format_income_list(
                    &incomes,
                    &snapshot.income_categories,
                    &currency,
                    &state.settings().date_format,
                )
            );
        }

        IncomeCommands::Delete { id } => {
            let id = IncomeId::new(id);
            state.delete_income(id).await?;
            println!("Deleted income {}", id);
        }

        IncomeCommands::Categories => {
            load(state, &[Collection::IncomeCategories]).await?;
            print!(
                "{}",
                format_income_categories(&state.snapshot().income_categories, &currency)
            );
        }
    }

    Ok(())
}
