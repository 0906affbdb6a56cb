//! Transaction module
//!
//! Transactions are the recorded money movements the rest of the app
//! aggregates over. This module provides the domain model, database
//! operations, the transactions page, and the endpoints for creating and
//! deleting transactions.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod new_transaction_page;
mod transactions_page;

pub use self::core::{
    Transaction, TransactionBuilder, TransactionId, TransactionTableRow, count_transactions,
    create_transaction, create_transaction_table, delete_transaction, get_ledger_entries,
    get_transaction, get_transaction_table_rows,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use new_transaction_page::get_new_transaction_page;
pub use transactions_page::get_transactions_page;
