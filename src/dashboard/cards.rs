//! Card components for the dashboard's headline figures.

use maud::{Markup, html};

use crate::{
    html::{format_currency, format_percentage},
    ledger::TotalsSummary,
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-6 shadow-md";

/// Renders the four summary cards: income, expenses, balance, and savings
/// rate.
pub(super) fn totals_cards_view(summary: &TotalsSummary) -> Markup {
    let balance_style = if summary.net_balance >= 0.0 {
        "text-2xl font-bold text-blue-600 dark:text-blue-400"
    } else {
        "text-2xl font-bold text-red-600 dark:text-red-400"
    };

    html! {
        section class="grid grid-cols-1 md:grid-cols-4 gap-4 w-full mb-8" {
            div class={(CARD_STYLE) " border-l-4 border-l-green-500"} {
                p class="text-sm text-gray-600 dark:text-gray-400" { "Total Income" }
                p class="text-2xl font-bold text-green-600 dark:text-green-400" {
                    (format_currency(summary.total_income))
                }
            }

            div class={(CARD_STYLE) " border-l-4 border-l-red-500"} {
                p class="text-sm text-gray-600 dark:text-gray-400" { "Total Expenses" }
                p class="text-2xl font-bold text-red-600 dark:text-red-400" {
                    (format_currency(summary.total_expense))
                }
            }

            div class={(CARD_STYLE) " border-l-4 border-l-blue-500"} {
                p class="text-sm text-gray-600 dark:text-gray-400" { "Balance" }
                p class=(balance_style) {
                    (format_currency(summary.net_balance))
                }
            }

            div class={(CARD_STYLE) " border-l-4 border-l-purple-500"} {
                p class="text-sm text-gray-600 dark:text-gray-400" { "Savings Rate" }
                p class="text-2xl font-bold text-purple-600 dark:text-purple-400" {
                    (format_percentage(summary.savings_rate)) "%"
                }
            }
        }
    }
}
