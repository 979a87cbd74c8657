//! Defines the endpoint for listing the session's transactions.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    session::SessionId,
    transaction::{Transaction, get_transactions, state::TransactionState},
};

/// The response body for the transaction list.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionsResponse {
    /// The session's transactions in the order they were created.
    pub transactions: Vec<Transaction>,
}

/// A route handler for listing every transaction of the current session.
///
/// **Note**: must be behind [require_session](crate::session::require_session).
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<TransactionsResponse>, Error> {
    let transactions = get_transactions(&session_id, &*state.connection()?)?;

    Ok(Json(TransactionsResponse { transactions }))
}
