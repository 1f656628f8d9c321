//! Application state
//!
//! `AppState` owns everything the dashboard shows: the last fetched
//! collections, the allocation percentages, the session, and the derived
//! monthly budget. It is created once per run and passed by reference; the
//! aggregation functions it calls take their data as arguments.

use std::fmt;
use std::future::Future;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::api::FinanceApi;
use crate::config::settings::Settings;
use crate::error::{FinboardError, FinboardResult};
use crate::models::{
    AllocationPercentages, Budget, BudgetId, Category, Expense, ExpenseId, Income,
    IncomeCategory, IncomeId, MonthlyBudget, NewBudget, NewExpense, NewIncome,
};
use crate::services::{self, period, BudgetView};
use crate::storage::{Password, Session, Storage};

/// The five collections fetched from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Categories,
    Expenses,
    Incomes,
    IncomeCategories,
    Budgets,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Categories,
        Collection::Expenses,
        Collection::Incomes,
        Collection::IncomeCategories,
        Collection::Budgets,
    ];
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Categories => "categories",
            Self::Expenses => "expenses",
            Self::Incomes => "incomes",
            Self::IncomeCategories => "income categories",
            Self::Budgets => "budgets",
        };
        f.write_str(s)
    }
}

/// Last successfully fetched copy of each collection
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
    pub income_categories: Vec<IncomeCategory>,
    pub budgets: Vec<Budget>,
}

/// Outcome of a refresh: which collections were replaced, which kept
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub updated: Vec<Collection>,
    pub failed: Vec<(Collection, FinboardError)>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

async fn fetch_if<T, F>(wanted: bool, fetch: F) -> Option<FinboardResult<T>>
where
    F: Future<Output = FinboardResult<T>>,
{
    if wanted {
        Some(fetch.await)
    } else {
        None
    }
}

/// Replace `target` on success; keep the previous copy on failure
fn apply<T>(
    target: &mut Vec<T>,
    which: Collection,
    result: Option<FinboardResult<Vec<T>>>,
    report: &mut RefreshReport,
) {
    match result {
        None => {}
        Some(Ok(items)) => {
            debug!(collection = %which, count = items.len(), "Replaced collection");
            *target = items;
            report.updated.push(which);
        }
        Some(Err(e)) => {
            warn!(collection = %which, error = %e, "Fetch failed, keeping previous data");
            report.failed.push((which, e));
        }
    }
}

fn is_unauthorized<T>(result: &Option<FinboardResult<T>>) -> bool {
    matches!(result, Some(Err(FinboardError::Unauthorized)))
}

/// Dashboard state over a [`FinanceApi`]
pub struct AppState<A: FinanceApi> {
    api: A,
    storage: Storage,
    settings: Settings,
    allocation: AllocationPercentages,
    session: Option<Session>,
    snapshot: Snapshot,
    reference: NaiveDate,
    monthly_budget: MonthlyBudget,
}

impl<A: FinanceApi> AppState<A> {
    /// Load allocation and session from local storage; nothing is fetched yet
    pub fn init(mut api: A, storage: Storage, settings: Settings) -> Self {
        let allocation = storage.allocation.load();
        let session = storage.session.load();
        api.set_token(session.as_ref().map(|s| s.token.clone()));

        match &session {
            Some(s) => info!(user = %s.user.username, "Restored session"),
            None => debug!("No saved session"),
        }

        let reference = period::today();
        let snapshot = Snapshot::default();
        let monthly_budget = services::compute_monthly_budget(
            &snapshot.incomes,
            &snapshot.expenses,
            &snapshot.categories,
            &allocation,
            reference,
        );

        Self {
            api,
            storage,
            settings,
            allocation,
            session,
            snapshot,
            reference,
            monthly_budget,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn allocation(&self) -> &AllocationPercentages {
        &self.allocation
    }

    pub fn monthly_budget(&self) -> &MonthlyBudget {
        &self.monthly_budget
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    /// Move the "current month" and recompute the monthly budget
    pub fn set_reference_date(&mut self, reference: NaiveDate) {
        self.reference = reference;
        self.recompute();
    }

    /// Statused view of every category budget
    pub fn budget_views(&self) -> Vec<BudgetView> {
        services::evaluate_budgets(&self.snapshot.budgets)
    }

    fn recompute(&mut self) {
        self.monthly_budget = services::compute_monthly_budget(
            &self.snapshot.incomes,
            &self.snapshot.expenses,
            &self.snapshot.categories,
            &self.allocation,
            self.reference,
        );
    }

    /// Validate, persist, and apply new allocation percentages
    pub fn set_allocation(
        &mut self,
        essentials: f64,
        growth: f64,
        emergency: f64,
        leisure: f64,
    ) -> FinboardResult<&MonthlyBudget> {
        self.allocation = self
            .storage
            .allocation
            .validate_and_save(essentials, growth, emergency, leisure)?;
        self.recompute();
        Ok(&self.monthly_budget)
    }

    pub async fn sign_in(
        &mut self,
        username_or_email: &str,
        password: &Password,
    ) -> FinboardResult<&Session> {
        if username_or_email.trim().is_empty() || password.is_empty() {
            return Err(FinboardError::Validation(
                "username and password are required".into(),
            ));
        }

        let session = self
            .api
            .sign_in(username_or_email.trim(), password)
            .await?
            .into_session();
        self.storage.session.save(&session)?;
        self.api.set_token(Some(session.token.clone()));
        info!(user = %session.user.username, "Signed in");

        Ok(&*self.session.insert(session))
    }

    /// Forget the session locally and drop everything fetched with it
    pub fn sign_out(&mut self) -> FinboardResult<()> {
        self.api.set_token(None);
        self.session = None;
        self.snapshot = Snapshot::default();
        self.recompute();
        self.storage.session.clear()?;
        info!("Signed out");
        Ok(())
    }

    fn require_session(&self) -> FinboardResult<()> {
        if self.session.is_none() {
            return Err(FinboardError::Unauthorized);
        }
        Ok(())
    }

    /// Sign out if the backend says the session is gone, then pass the result on
    fn check_auth<T>(&mut self, result: FinboardResult<T>) -> FinboardResult<T> {
        if let Err(FinboardError::Unauthorized) = &result {
            if let Err(e) = self.sign_out() {
                warn!(error = %e, "Failed to clear expired session");
            }
        }
        result
    }

    /// Fetch all five collections concurrently
    pub async fn refresh(&mut self) -> FinboardResult<RefreshReport> {
        self.reload(&Collection::ALL).await
    }

    /// Fetch the given collections concurrently, then recompute
    ///
    /// Each collection is replaced only if its own fetch succeeded. A 401 on
    /// any of them signs out and fails the whole reload.
    pub async fn reload(&mut self, which: &[Collection]) -> FinboardResult<RefreshReport> {
        self.require_session()?;
        let wants = |c: Collection| which.contains(&c);

        let api = &self.api;
        let (categories, expenses, incomes, income_categories, budgets) = tokio::join!(
            fetch_if(wants(Collection::Categories), api.list_categories()),
            fetch_if(wants(Collection::Expenses), api.list_expenses()),
            fetch_if(wants(Collection::Incomes), api.list_incomes()),
            fetch_if(
                wants(Collection::IncomeCategories),
                api.list_income_categories()
            ),
            fetch_if(wants(Collection::Budgets), api.list_budgets()),
        );

        if is_unauthorized(&categories)
            || is_unauthorized(&expenses)
            || is_unauthorized(&incomes)
            || is_unauthorized(&income_categories)
            || is_unauthorized(&budgets)
        {
            return self.check_auth(Err(FinboardError::Unauthorized));
        }

        let mut report = RefreshReport::default();
        let snapshot = &mut self.snapshot;
        apply(&mut snapshot.categories, Collection::Categories, categories, &mut report);
        apply(&mut snapshot.expenses, Collection::Expenses, expenses, &mut report);
        apply(&mut snapshot.incomes, Collection::Incomes, incomes, &mut report);
        apply(
            &mut snapshot.income_categories,
            Collection::IncomeCategories,
            income_categories,
            &mut report,
        );
        apply(&mut snapshot.budgets, Collection::Budgets, budgets, &mut report);

        self.recompute();
        Ok(report)
    }

    /// Reload after a successful write; a failed reload does not undo the write
    async fn reload_after_write(&mut self, which: &[Collection]) -> FinboardResult<()> {
        let report = self.reload(which).await?;
        for (collection, error) in &report.failed {
            warn!(collection = %collection, error = %error, "Reload after write failed");
        }
        Ok(())
    }

    pub async fn add_expense(&mut self, expense: NewExpense) -> FinboardResult<Expense> {
        expense.validate()?;
        self.require_session()?;
        let result = self.api.create_expense(&expense).await;
        let created = self.check_auth(result)?;
        info!(id = %created.id, "Created expense");
        self.reload_after_write(&[Collection::Expenses, Collection::Budgets])
            .await?;
        Ok(created)
    }

    pub async fn delete_expense(&mut self, id: ExpenseId) -> FinboardResult<()> {
        self.require_session()?;
        let result = self.api.delete_expense(id).await;
        self.check_auth(result)
            .map_err(|e| not_found_as(e, || FinboardError::expense_not_found(id.to_string())))?;
        info!(%id, "Deleted expense");
        self.reload_after_write(&[Collection::Expenses, Collection::Budgets])
            .await
    }

    pub async fn add_income(&mut self, income: NewIncome) -> FinboardResult<Income> {
        income.validate()?;
        self.require_session()?;
        let result = self.api.create_income(&income).await;
        let created = self.check_auth(result)?;
        info!(id = %created.id, "Created income");
        self.reload_after_write(&[Collection::Incomes, Collection::IncomeCategories])
            .await?;
        Ok(created)
    }

    pub async fn delete_income(&mut self, id: IncomeId) -> FinboardResult<()> {
        self.require_session()?;
        let result = self.api.delete_income(id).await;
        self.check_auth(result)
            .map_err(|e| not_found_as(e, || FinboardError::income_not_found(id.to_string())))?;
        info!(%id, "Deleted income");
        self.reload_after_write(&[Collection::Incomes, Collection::IncomeCategories])
            .await
    }

    pub async fn add_budget(&mut self, budget: NewBudget) -> FinboardResult<Budget> {
        budget.validate()?;
        self.require_session()?;
        let result = self.api.create_budget(&budget).await;
        let created = self.check_auth(result)?;
        info!(id = %created.id, "Created budget");
        self.reload_after_write(&[Collection::Budgets]).await?;
        Ok(created)
    }

    pub async fn delete_budget(&mut self, id: BudgetId) -> FinboardResult<()> {
        self.require_session()?;
        let result = self.api.delete_budget(id).await;
        self.check_auth(result)
            .map_err(|e| not_found_as(e, || FinboardError::budget_not_found(id.to_string())))?;
        info!(%id, "Deleted budget");
        self.reload_after_write(&[Collection::Budgets]).await
    }

    /// Drop fetched data; the session and allocation stay on disk
    pub fn teardown(self) {
        debug!(
            expenses = self.snapshot.expenses.len(),
            incomes = self.snapshot.incomes.len(),
            "Tearing down dashboard state"
        );
    }
}

fn not_found_as(err: FinboardError, not_found: impl FnOnce() -> FinboardError) -> FinboardError {
    match err {
        FinboardError::Api { status: 404, .. } => not_found(),
        other => other,
    }
}
