//! The session-scoped transaction ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` for creating transactions
//! - Database functions for storing, querying and summing transactions
//! - The JSON endpoints for listing, fetching, summarising and creating transactions

mod core;
mod create_endpoint;
mod extract;
mod get_endpoint;
mod list_endpoint;
mod state;
mod summary_endpoint;

pub use self::core::{
    NewTransaction, Summary, Transaction, TransactionId, TransactionType, create_transaction,
    create_transaction_table, get_summary, get_transaction, get_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use get_endpoint::{TransactionResponse, get_transaction_endpoint};
pub use list_endpoint::{TransactionsResponse, get_transactions_endpoint};
pub use summary_endpoint::{SummaryResponse, get_summary_endpoint};
