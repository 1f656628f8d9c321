//! Expense categories and income categories
//!
//! Both are owned by the backend and referenced by id from expenses, incomes
//! and budgets. The client only ever resolves ids to display names.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, IncomeCategoryId};
use super::money::Money;

/// Something a record can point at and that has a display name
pub trait Labelled {
    fn key(&self) -> i64;
    fn label(&self) -> &str;
}

/// Find by name (case-insensitive) first, then by numeric id, optionally "#"-prefixed
pub fn find_labelled<'a, C: Labelled>(items: &'a [C], identifier: &str) -> Option<&'a C> {
    let identifier = identifier.trim();
    if let Some(item) = items
        .iter()
        .find(|c| c.label().eq_ignore_ascii_case(identifier))
    {
        return Some(item);
    }

    let id: i64 = identifier.trim_start_matches('#').parse().ok()?;
    items.iter().find(|c| c.key() == id)
}

/// An expense category (e.g. "Groceries")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    #[serde(default)]
    pub icon_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub color_code: Option<String>,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            icon_name: None,
            description: None,
            color_code: None,
        }
    }
}

impl Labelled for Category {
    fn key(&self) -> i64 {
        self.id.get()
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An income category with totals aggregated by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeCategory {
    pub id: IncomeCategoryId,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub icon_name: Option<String>,

    #[serde(default)]
    pub color_code: Option<String>,

    /// Server-aggregated sum of incomes in this category
    #[serde(default)]
    pub total_amount: Money,

    /// Server-aggregated number of incomes in this category
    #[serde(default)]
    pub count: u64,
}

impl IncomeCategory {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: IncomeCategoryId::new(id),
            name: name.into(),
            description: None,
            icon_name: None,
            color_code: None,
            total_amount: Money::zero(),
            count: 0,
        }
    }
}

impl Labelled for IncomeCategory {
    fn key(&self) -> i64 {
        self.id.get()
    }

    fn label(&self) -> &str {
        &self.name
    }
}
