use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_test::{TestResponse, TestServer};
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{AppState, build_router, endpoints, session::SESSION_COOKIE};

/// A server for the full app backed by an empty in-memory database.
pub(crate) fn get_test_server() -> TestServer {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = AppState::new(connection).expect("Could not initialize database.");

    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

/// Create a transaction through the API and return the session cookie it was stored under.
///
/// Pass `None` for `cookie` to start a new session.
pub(crate) async fn create_transaction(
    server: &TestServer,
    cookie: Option<Cookie<'static>>,
    title: &str,
    amount: f64,
    kind: &str,
) -> Cookie<'static> {
    let request = server
        .post(endpoints::TRANSACTIONS)
        .json(&json!({ "title": title, "amount": amount, "type": kind }));

    match cookie {
        Some(cookie) => {
            request
                .add_cookie(cookie.clone())
                .await
                .assert_status(StatusCode::CREATED);
            cookie
        }
        None => {
            let response = request.await;
            response.assert_status(StatusCode::CREATED);
            response.cookie(SESSION_COOKIE)
        }
    }
}

#[track_caller]
pub(crate) fn assert_validation_error(response: &TestResponse) {
    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert!(
        body["message"].as_str().is_some_and(|message| !message.is_empty()),
        "want a message describing the mismatch, got {body}"
    );
}
