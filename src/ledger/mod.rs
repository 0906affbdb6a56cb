//! Ledger aggregation engine.
//!
//! Pure, stateless summary computation over an in-memory snapshot of ledger
//! entries:
//! - overall totals and savings rate,
//! - per-category expense breakdown with percentages,
//! - per-month income/expense series,
//! - budget consumption with threshold-based status,
//! - aggregate statistics across all entries.
//!
//! Every function here is a pure function of its inputs: no I/O, no retained
//! state, and no panics or errors for well-typed input. Ratios with a zero
//! denominator are defined as zero, never NaN or infinity. Malformed stored
//! rows are skipped at the store boundary and never reach this module.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

mod breakdown;
mod progress;
mod series;
mod summary;

pub use breakdown::{CategoryShare, OTHER_LABEL, category_breakdown};
pub use progress::{BudgetProgress, BudgetStatus, budget_progress};
pub use series::{MonthlyTotals, PeriodKey, monthly_series};
pub use summary::{AggregateStats, TotalsSummary, aggregate_stats, compute_totals};

/// Whether a money movement is money earned or money spent.
///
/// Amounts are always zero or positive; the direction of a transaction is
/// carried by its kind, never by a negative amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in, e.g. salary.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The kind as the lowercase string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(Error::UnknownKind(other.to_owned())),
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single money movement, reduced to the fields the aggregation functions
/// need.
///
/// The stores build these from database rows; see
/// [crate::transaction::get_ledger_entries].
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Whether the entry is income or an expense.
    pub kind: TransactionKind,
    /// The amount of money moved. Zero or positive.
    pub amount: f64,
    /// When the money moved.
    pub date: Date,
    /// The ID of the category the entry belongs to, if any.
    pub category_id: Option<i64>,
    /// The display name of the category the entry belongs to, if any.
    pub category: Option<String>,
}

impl Entry {
    /// Create an entry without a category.
    pub fn new(kind: TransactionKind, amount: f64, date: Date) -> Self {
        Self {
            kind,
            amount,
            date,
            category_id: None,
            category: None,
        }
    }

    /// Set the category ID and display name for the entry.
    pub fn with_category(mut self, category_id: i64, category: &str) -> Self {
        self.category_id = Some(category_id);
        self.category = Some(category.to_owned());
        self
    }
}
