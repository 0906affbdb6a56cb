//! Analytics module
//!
//! Provides the charts page: monthly income/expense trends and the expense
//! distribution across categories, rendered with ECharts.

mod charts;
mod handlers;

pub use handlers::get_analytics_page;
