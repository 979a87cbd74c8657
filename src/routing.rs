//! Application router configuration with session-gated and open route definitions.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    logging::{MAX_REQUEST_BODY_BYTES, logging_middleware},
    not_found::get_404_not_found,
    session::require_session,
    transaction::{
        create_transaction_endpoint, get_summary_endpoint, get_transaction_endpoint,
        get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Reads require a session cookie. Creating a transaction does not, since
/// it is how a client gets a session in the first place. Every request and
/// response passes through [logging_middleware], and request bodies are
/// capped at [MAX_REQUEST_BODY_BYTES].
pub fn build_router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::TRANSACTIONS_SUMMARY, get(get_summary_endpoint))
        .route(endpoints::TRANSACTION, get(get_transaction_endpoint))
        .route_layer(middleware::from_fn(require_session));

    let open_routes =
        Router::new().route(endpoints::TRANSACTIONS, post(create_transaction_endpoint));

    session_routes
        .merge(open_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .with_state(state)
}
