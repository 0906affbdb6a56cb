//! Per-month income/expense series.

use std::{collections::BTreeMap, fmt::Display};

use time::Date;

use crate::ledger::{Entry, TransactionKind};

/// A calendar month used to bucket entries for trend reporting.
///
/// This is a structured, locale-independent key; formatting for display
/// happens at the view layer via [Display].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    /// Calendar year, e.g. 2025.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u8,
}

impl PeriodKey {
    /// The period containing `date`.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }

    /// Three-letter month abbreviation, e.g. "Jan".
    pub fn month_abbreviation(self) -> &'static str {
        match self.month {
            1 => "Jan",
            2 => "Feb",
            3 => "Mar",
            4 => "Apr",
            5 => "May",
            6 => "Jun",
            7 => "Jul",
            8 => "Aug",
            9 => "Sep",
            10 => "Oct",
            11 => "Nov",
            12 => "Dec",
            _ => "???",
        }
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_abbreviation(), self.year)
    }
}

/// Income and expense totals for one period.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyTotals {
    /// Sum of income amounts in the period.
    pub income: f64,
    /// Sum of expense amounts in the period.
    pub expense: f64,
}

/// Buckets entries by calendar month and sums income and expenses per bucket.
///
/// Buckets are created lazily on first contribution; months with no entries
/// are absent rather than pre-filled with zeros. The result is ordered
/// chronologically ascending.
pub fn monthly_series(entries: &[Entry]) -> Vec<(PeriodKey, MonthlyTotals)> {
    let mut buckets: BTreeMap<PeriodKey, MonthlyTotals> = BTreeMap::new();

    for entry in entries {
        let bucket = buckets
            .entry(PeriodKey::from_date(entry.date))
            .or_default();

        match entry.kind {
            TransactionKind::Income => bucket.income += entry.amount,
            TransactionKind::Expense => bucket.expense += entry.amount,
        }
    }

    buckets.into_iter().collect()
}
