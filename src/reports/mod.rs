//! Reports module
//!
//! Provides the monthly summary report page and the CSV export of the full
//! transaction history.

mod csv_export;
mod handlers;

pub use csv_export::get_transactions_csv;
pub use handlers::get_reports_page;
