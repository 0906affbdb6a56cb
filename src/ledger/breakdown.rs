//! Per-category expense breakdown.

use std::collections::HashMap;

use crate::ledger::{Entry, TransactionKind};

/// Label used to group expenses that have no category.
pub const OTHER_LABEL: &str = "Other";

/// One category's slice of the total expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    /// The category name, or [OTHER_LABEL] for uncategorised expenses.
    pub label: String,
    /// Sum of the expense amounts in this category.
    pub amount: f64,
    /// This category's share of total expenses, e.g. `35.0`.
    pub percentage: f64,
}

/// Groups expense entries by category and computes each group's share of the
/// total.
///
/// Income entries are ignored. Entries without a category are grouped under
/// [OTHER_LABEL]. A category with no matching expenses is simply absent,
/// never emitted with a zero percentage, and when there are no expenses at
/// all the result is empty rather than a list of NaN shares.
///
/// The result is sorted by descending amount, with ties broken by label so
/// the ordering is deterministic.
pub fn category_breakdown(entries: &[Entry]) -> Vec<CategoryShare> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for entry in entries {
        if entry.kind != TransactionKind::Expense {
            continue;
        }

        let label = entry.category.as_deref().unwrap_or(OTHER_LABEL);
        *totals.entry(label).or_insert(0.0) += entry.amount;
    }

    let total_expense: f64 = totals.values().sum();

    if total_expense <= 0.0 {
        return Vec::new();
    }

    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(label, amount)| CategoryShare {
            label: label.to_owned(),
            amount,
            percentage: amount / total_expense * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.label.cmp(&b.label))
    });

    shares
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::ledger::{Entry, TransactionKind};

    use super::{OTHER_LABEL, category_breakdown};

    fn expense(amount: f64, category: Option<&str>) -> Entry {
        let entry = Entry::new(TransactionKind::Expense, amount, date!(2025 - 01 - 15));

        match category {
            Some(name) => entry.with_category(1, name),
            None => entry,
        }
    }

    #[test]
    fn empty_snapshot_yields_empty_breakdown() {
        assert_eq!(category_breakdown(&[]), Vec::new());
    }

    #[test]
    fn income_only_snapshot_yields_empty_breakdown() {
        let entries = vec![Entry::new(
            TransactionKind::Income,
            1000.0,
            date!(2025 - 01 - 05),
        )];

        assert!(category_breakdown(&entries).is_empty());
    }

    #[test]
    fn groups_expenses_by_category() {
        let entries = vec![
            expense(300.0, Some("Food")),
            expense(200.0, Some("Food")),
            expense(500.0, Some("Rent")),
        ];

        let shares = category_breakdown(&entries);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].label, "Food");
        assert_eq!(shares[0].amount, 500.0);
        assert_eq!(shares[1].label, "Rent");
        assert_eq!(shares[1].amount, 500.0);
    }

    #[test]
    fn uncategorised_expenses_group_under_other() {
        let entries = vec![expense(75.0, None), expense(25.0, Some("Food"))];

        let shares = category_breakdown(&entries);

        assert_eq!(shares[0].label, OTHER_LABEL);
        assert_eq!(shares[0].amount, 75.0);
        assert_eq!(shares[0].percentage, 75.0);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let entries = vec![
            expense(123.45, Some("Food")),
            expense(67.89, Some("Transport")),
            expense(9.99, None),
            Entry::new(TransactionKind::Income, 5000.0, date!(2025 - 01 - 01)),
        ];

        let shares = category_breakdown(&entries);

        let percentage_sum: f64 = shares.iter().map(|share| share.percentage).sum();
        assert!(
            (percentage_sum - 100.0).abs() < 0.01,
            "want percentages summing to 100, got {percentage_sum}"
        );
    }

    #[test]
    fn sorts_by_descending_amount_then_label() {
        let entries = vec![
            expense(100.0, Some("Zoo")),
            expense(100.0, Some("Art")),
            expense(400.0, Some("Rent")),
        ];

        let shares = category_breakdown(&entries);

        let labels: Vec<&str> = shares.iter().map(|share| share.label.as_str()).collect();
        assert_eq!(labels, vec!["Rent", "Art", "Zoo"]);
    }

    #[test]
    fn ignores_income_amounts_in_totals() {
        let entries = vec![
            expense(50.0, Some("Food")),
            Entry::new(TransactionKind::Income, 950.0, date!(2025 - 01 - 05))
                .with_category(2, "Salary"),
        ];

        let shares = category_breakdown(&entries);

        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].label, "Food");
        assert_eq!(shares[0].percentage, 100.0);
    }
}
