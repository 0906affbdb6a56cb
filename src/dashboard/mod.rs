//! Dashboard module
//!
//! Provides the landing page showing overall totals, the savings rate, and
//! the most recent transactions.

mod cards;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
