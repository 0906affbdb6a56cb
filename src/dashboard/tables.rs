//! The recent transactions list for the dashboard.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{CATEGORY_BADGE_STYLE, format_currency, link},
    ledger::TransactionKind,
    transaction::TransactionTableRow,
};

/// Renders the most recent transactions as a compact list.
pub(super) fn recent_transactions_view(rows: &[TransactionTableRow]) -> Markup {
    let all_transactions_link = link(endpoints::TRANSACTIONS_VIEW, "View all transactions");

    html! {
        section class="w-full bg-white dark:bg-gray-800 border border-gray-200 \
            dark:border-gray-700 rounded-lg p-6 shadow-md"
        {
            h3 class="text-xl font-semibold mb-4" { "Recent Transactions" }

            div class="space-y-3"
            {
                @for row in rows {
                    (recent_transaction_row(row))
                }
            }

            p class="mt-4" { (all_transactions_link) }
        }
    }
}

fn recent_transaction_row(row: &TransactionTableRow) -> Markup {
    let (amount_style, amount_sign) = match row.kind {
        TransactionKind::Income => ("font-semibold text-green-600 dark:text-green-400", "+"),
        TransactionKind::Expense => ("font-semibold text-red-600 dark:text-red-400", "-"),
    };

    html! {
        div class="flex items-center justify-between p-3 bg-gray-50 dark:bg-gray-700 rounded-lg"
        {
            div class="flex-1"
            {
                p class="font-medium"
                {
                    @if row.description.is_empty() {
                        @if let Some(category_name) = &row.category_name {
                            (category_name)
                        } @else {
                            "Transaction"
                        }
                    } @else {
                        (row.description)
                    }
                }

                p class="text-sm text-gray-600 dark:text-gray-400" { (row.date) }
            }

            @if let Some(category_name) = &row.category_name {
                span class={(CATEGORY_BADGE_STYLE) " mr-4"} { (category_name) }
            }

            p class=(amount_style)
            {
                (amount_sign) (format_currency(row.amount))
            }
        }
    }
}
