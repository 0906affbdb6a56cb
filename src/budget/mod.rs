//! Budget module
//!
//! Budgets are spending ceilings for a category within a specific month and
//! year. The spent amount is never stored; it is always derived from the
//! matching expense transactions by the ledger aggregation engine.

mod budgets_page;
mod core;
mod create;
mod delete;

pub use budgets_page::get_budgets_page;
pub use self::core::{
    Budget, BudgetId, BudgetWithCategory, NewBudget, create_budget, create_budget_table,
    delete_budget, get_budget, get_budgets_for_month,
};
pub use create::{create_budget_endpoint, get_new_budget_page};
pub use delete::delete_budget_endpoint;
