//! Defines functions for reading and setting the session cookie.

use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use time::Duration;

use super::SessionId;

/// The name of the cookie holding the session ID.
pub const SESSION_COOKIE: &str = "sessionId";
/// How long the client keeps the session cookie.
pub const SESSION_COOKIE_DURATION: Duration = Duration::days(7);

/// Build the cookie that persists `session_id` on the client for
/// [SESSION_COOKIE_DURATION].
pub fn build_session_cookie(session_id: &SessionId) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id.as_str().to_owned()))
        .path("/")
        .max_age(SESSION_COOKIE_DURATION)
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Get the session ID from the cookie jar, if the client sent a non-blank one.
pub fn get_session_id_from_cookies(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value_trimmed()))
}

/// Decide which session a write belongs to.
///
/// Returns the session from `jar` and no cookie when the client already has
/// one. Otherwise a new session is minted and returned together with the
/// cookie that the caller must add to the response.
///
/// The jar is never modified here.
pub fn resolve_or_create_session(jar: &CookieJar) -> (SessionId, Option<Cookie<'static>>) {
    match get_session_id_from_cookies(jar) {
        Some(session_id) => (session_id, None),
        None => {
            let session_id = SessionId::new_random();
            tracing::debug!("Minted new session {session_id}");
            let cookie = build_session_cookie(&session_id);

            (session_id, Some(cookie))
        }
    }
}
