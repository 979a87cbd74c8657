//! Defines the endpoint for fetching a single transaction.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    session::SessionId,
    transaction::{
        Transaction, TransactionId, extract::ValidPath, get_transaction, state::TransactionState,
    },
};

/// The response body for a single transaction.
///
/// `transaction` is `null` when the ID does not exist or belongs to another session.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// The matching transaction, if any.
    pub transaction: Option<Transaction>,
}

/// A route handler for getting one of the current session's transactions by its ID.
///
/// A malformed ID is rejected with 400 before the database is queried.
///
/// **Note**: must be behind [require_session](crate::session::require_session).
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(session_id): Extension<SessionId>,
    ValidPath(transaction_id): ValidPath<TransactionId>,
) -> Result<Json<TransactionResponse>, Error> {
    let transaction = get_transaction(transaction_id, &session_id, &*state.connection()?)?;

    Ok(Json(TransactionResponse { transaction }))
}
