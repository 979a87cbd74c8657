//! Defines the endpoint for the total of the session's transactions.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    session::SessionId,
    transaction::{Summary, get_summary, state::TransactionState},
};

/// The response body for the summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// The sum of the session's amounts.
    pub summary: Summary,
}

/// A route handler for the sum of the current session's transaction amounts.
///
/// **Note**: must be behind [require_session](crate::session::require_session).
pub async fn get_summary_endpoint(
    State(state): State<TransactionState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<SummaryResponse>, Error> {
    let summary = get_summary(&session_id, &*state.connection()?)?;

    Ok(Json(SummaryResponse { summary }))
}
