//! Defines the endpoint for creating a new transaction.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    Error,
    session::resolve_or_create_session,
    transaction::{
        NewTransaction, TransactionType, create_transaction, extract::ValidJson,
        state::TransactionState,
    },
};

/// The JSON body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Text detailing the transaction.
    pub title: String,
    /// The unsigned value of the transaction.
    pub amount: f64,
    /// Whether money came in or went out.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// A route handler for creating a new transaction, responds with 201 Created and no body.
///
/// Clients without a session get one, and the response sets the session
/// cookie. Clients that send a session cookie keep it unchanged.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    jar: CookieJar,
    ValidJson(request): ValidJson<CreateTransactionRequest>,
) -> Result<Response, Error> {
    if request.title.trim().is_empty() {
        return Err(Error::Validation("title must not be empty".to_owned()));
    }

    let (session_id, new_cookie) = resolve_or_create_session(&jar);
    let new_transaction =
        NewTransaction::new(session_id, &request.title, request.amount, request.kind);

    let transaction = create_transaction(new_transaction, &*state.connection()?)?;
    tracing::debug!(
        "Created transaction {} for session {}",
        transaction.id,
        transaction.session_id
    );

    let response = match new_cookie {
        Some(cookie) => (StatusCode::CREATED, jar.add(cookie)).into_response(),
        None => StatusCode::CREATED.into_response(),
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::{StatusCode, header::SET_COOKIE},
    };
    use axum_extra::extract::{CookieJar, cookie::Cookie};
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        session::{SESSION_COOKIE, SessionId},
        transaction::{
            TransactionType,
            create_endpoint::{CreateTransactionRequest, create_transaction_endpoint},
            extract::ValidJson,
            get_transactions,
            state::TransactionState,
        },
    };

    fn get_test_state() -> TransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        TransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn request(
        title: &str,
        amount: f64,
        kind: TransactionType,
    ) -> ValidJson<CreateTransactionRequest> {
        ValidJson(CreateTransactionRequest {
            title: title.to_owned(),
            amount,
            kind,
        })
    }

    #[tokio::test]
    async fn can_create_transaction_for_existing_session() {
        let state = get_test_state();
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "existing"));

        let response = create_transaction_endpoint(
            State(state.clone()),
            jar,
            request("Rent", 1200.0, TransactionType::Debit),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(
            response.headers().get(SET_COOKIE).is_none(),
            "want no new cookie for an existing session"
        );

        let connection = state.db_connection.lock().unwrap();
        let transactions =
            get_transactions(&SessionId::parse("existing").unwrap(), &connection).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].title, "Rent");
        assert_eq!(transactions[0].amount, -1200.0);
    }

    #[tokio::test]
    async fn sets_cookie_for_new_session() {
        let state = get_test_state();

        let response = create_transaction_endpoint(
            State(state),
            CookieJar::new(),
            request("Salary", 5000.0, TransactionType::Credit),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .expect("want the session cookie to be set")
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with(&format!("{SESSION_COOKIE}=")));
        assert!(set_cookie.contains("Max-Age=604800"));
        assert!(set_cookie.contains("Path=/"));
    }

    #[tokio::test]
    async fn rejects_blank_title() {
        let state = get_test_state();

        let result = create_transaction_endpoint(
            State(state),
            CookieJar::new(),
            request("  ", 1.0, TransactionType::Credit),
        )
        .await;

        assert!(matches!(result, Err(crate::Error::Validation(_))));
    }
}
