//! Budget consumption and status classification.

use crate::{
    budget::Budget,
    ledger::{Entry, TransactionKind, series::PeriodKey},
};

/// How far through a budget the matching spending is.
///
/// Thresholds: below 70% is [BudgetStatus::Ok], 70-90% is
/// [BudgetStatus::Warning], 90-100% is [BudgetStatus::Critical], and 100% or
/// more is [BudgetStatus::Exceeded].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Spending is comfortably below the limit.
    Ok,
    /// Spending has reached 70% of the limit.
    Warning,
    /// Spending has reached 90% of the limit.
    Critical,
    /// Spending has reached or passed the limit.
    Exceeded,
}

impl BudgetStatus {
    /// Classify a consumption percentage.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            BudgetStatus::Exceeded
        } else if percentage >= 90.0 {
            BudgetStatus::Critical
        } else if percentage >= 70.0 {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Ok
        }
    }

    /// A short label for status badges.
    pub fn label(self) -> &'static str {
        match self {
            BudgetStatus::Ok => "On track",
            BudgetStatus::Warning => "Warning",
            BudgetStatus::Critical => "Critical",
            BudgetStatus::Exceeded => "Exceeded",
        }
    }
}

/// Derived consumption figures for one budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetProgress {
    /// Sum of matching expense amounts for the budget's category and month.
    pub spent: f64,
    /// `limit - spent`. Negative once the budget is exceeded.
    pub remaining: f64,
    /// `spent / limit * 100`, uncapped.
    ///
    /// Progress bars must clamp the rendered width to 100 while still showing
    /// this true figure and the overage.
    pub percentage: f64,
    /// Threshold classification of `percentage`.
    pub status: BudgetStatus,
}

/// Derives how much of `budget` has been consumed by the matching entries.
///
/// Spent is never stored; it is always the sum of expense entries whose
/// category matches the budget's category and whose date falls in the
/// budget's month and year. A budget with no matching entries yields zero
/// spend with [BudgetStatus::Ok].
///
/// The budget's limit is validated to be positive at creation time, so no
/// division guard is needed here.
pub fn budget_progress(budget: &Budget, entries: &[Entry]) -> BudgetProgress {
    let period = PeriodKey {
        year: budget.year,
        month: budget.month,
    };

    let spent: f64 = entries
        .iter()
        .filter(|entry| {
            entry.kind == TransactionKind::Expense
                && entry.category_id == Some(budget.category_id)
                && PeriodKey::from_date(entry.date) == period
        })
        .map(|entry| entry.amount)
        .sum();

    let percentage = spent / budget.limit * 100.0;

    BudgetProgress {
        spent,
        remaining: budget.limit - spent,
        percentage,
        status: BudgetStatus::from_percentage(percentage),
    }
}
