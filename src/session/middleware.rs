//! Middleware that rejects reads from clients without a session.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::{Error, session::get_session_id_from_cookies};

/// Middleware function that checks for a session cookie.
///
/// The session ID is placed into the request and then the request executed
/// normally if the cookie is present, otherwise [Error::Unauthorized] is
/// returned and the handler never runs.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(session_id): Extension<SessionId>` to receive the session ID.
pub async fn require_session(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let Some(session_id) = get_session_id_from_cookies(&jar) else {
        tracing::debug!(
            "Rejected [{}] {}: no session cookie",
            request.method(),
            request.uri()
        );
        return Error::Unauthorized.into_response();
    };

    request.extensions_mut().insert(session_id);

    next.run(request).await
}
