//! Overall totals and whole-ledger statistics.

use crate::ledger::{Entry, TransactionKind};

/// Total income, total expense, and the figures derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalsSummary {
    /// Sum of all income amounts.
    pub total_income: f64,
    /// Sum of all expense amounts.
    pub total_expense: f64,
    /// `total_income - total_expense`. May be negative.
    pub net_balance: f64,
    /// The net balance as a percentage of total income, e.g. `50.0`.
    ///
    /// Defined as exactly zero when there is no income.
    pub savings_rate: f64,
}

/// Sums income and expenses and derives the net balance and savings rate.
///
/// An empty snapshot yields an all-zero summary.
pub fn compute_totals(entries: &[Entry]) -> TotalsSummary {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;

    for entry in entries {
        match entry.kind {
            TransactionKind::Income => total_income += entry.amount,
            TransactionKind::Expense => total_expense += entry.amount,
        }
    }

    let net_balance = total_income - total_expense;
    let savings_rate = if total_income > 0.0 {
        net_balance / total_income * 100.0
    } else {
        0.0
    };

    TotalsSummary {
        total_income,
        total_expense,
        net_balance,
        savings_rate,
    }
}

/// Statistics across all entries regardless of kind.
///
/// Income and expense amounts are deliberately pooled into one
/// average/max/min, matching how the transaction list reports "typical
/// transaction size".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateStats {
    /// Mean amount, rounded to the nearest whole unit.
    pub average: f64,
    /// The largest single amount.
    pub max: f64,
    /// The smallest single amount.
    pub min: f64,
    /// How many entries were counted.
    pub count: usize,
}

/// Computes the average, largest, and smallest amount across all entries.
///
/// The max/min are computed with a fold rather than assuming sorted input,
/// and an empty snapshot yields all zeros rather than an infinity from an
/// unguarded max/min.
pub fn aggregate_stats(entries: &[Entry]) -> AggregateStats {
    if entries.is_empty() {
        return AggregateStats {
            average: 0.0,
            max: 0.0,
            min: 0.0,
            count: 0,
        };
    }

    let mut sum = 0.0;
    let mut max = f64::MIN;
    let mut min = f64::MAX;

    for entry in entries {
        sum += entry.amount;
        max = max.max(entry.amount);
        min = min.min(entry.amount);
    }

    AggregateStats {
        average: (sum / entries.len() as f64).round(),
        max,
        min,
        count: entries.len(),
    }
}

#[cfg(test)]
mod compute_totals_tests {
    use time::macros::date;

    use crate::ledger::{Entry, TransactionKind};

    use super::compute_totals;

    #[test]
    fn empty_snapshot_yields_all_zeros() {
        let summary = compute_totals(&[]);

        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expense, 0.0);
        assert_eq!(summary.net_balance, 0.0);
        assert_eq!(summary.savings_rate, 0.0);
    }

    #[test]
    fn sums_income_and_expenses_separately() {
        let entries = vec![
            Entry::new(TransactionKind::Income, 1000.0, date!(2025 - 01 - 05)),
            Entry::new(TransactionKind::Expense, 300.0, date!(2025 - 01 - 10)),
            Entry::new(TransactionKind::Expense, 200.0, date!(2025 - 02 - 01)),
        ];

        let summary = compute_totals(&entries);

        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.total_expense, 500.0);
        assert_eq!(summary.net_balance, 500.0);
        assert_eq!(summary.savings_rate, 50.0);
    }

    #[test]
    fn net_balance_equals_income_minus_expense() {
        let entries = vec![
            Entry::new(TransactionKind::Income, 123.45, date!(2024 - 03 - 01)),
            Entry::new(TransactionKind::Income, 67.89, date!(2024 - 04 - 01)),
            Entry::new(TransactionKind::Expense, 200.0, date!(2024 - 04 - 02)),
        ];

        let summary = compute_totals(&entries);

        assert_eq!(
            summary.net_balance,
            summary.total_income - summary.total_expense
        );
    }

    #[test]
    fn savings_rate_is_zero_without_income() {
        let entries = vec![Entry::new(
            TransactionKind::Expense,
            50.0,
            date!(2025 - 06 - 15),
        )];

        let summary = compute_totals(&entries);

        assert_eq!(summary.savings_rate, 0.0);
        assert!(summary.savings_rate.is_finite());
    }

    #[test]
    fn savings_rate_is_negative_when_overspending() {
        let entries = vec![
            Entry::new(TransactionKind::Income, 100.0, date!(2025 - 06 - 01)),
            Entry::new(TransactionKind::Expense, 150.0, date!(2025 - 06 - 15)),
        ];

        let summary = compute_totals(&entries);

        assert_eq!(summary.savings_rate, -50.0);
    }
}
