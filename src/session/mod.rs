//! Anonymous sessions identified by the `sessionId` cookie.
//!
//! A session has no server-side state. Its only storage is the client's
//! cookie jar and the `session_id` column of the transactions it created.

mod cookie;
mod middleware;

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use cookie::{
    SESSION_COOKIE, SESSION_COOKIE_DURATION, get_session_id_from_cookies, resolve_or_create_session,
};
pub use middleware::require_session;

/// The opaque identifier of an anonymous session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a new session ID from a random (v4) UUID.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap `value` as a session ID, or `None` if it is blank.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();

        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_owned()))
        }
    }

    /// The ID as it is stored in the cookie and the database.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::SessionId;

    #[test]
    fn random_session_id_is_a_uuid() {
        let session_id = SessionId::new_random();

        assert!(Uuid::parse_str(session_id.as_str()).is_ok());
    }

    #[test]
    fn random_session_ids_differ() {
        assert_ne!(SessionId::new_random(), SessionId::new_random());
    }

    #[test]
    fn blank_value_is_not_a_session_id() {
        assert_eq!(SessionId::parse(""), None);
        assert_eq!(SessionId::parse("   "), None);
    }

    #[test]
    fn parse_keeps_opaque_value() {
        let session_id = SessionId::parse("not-a-uuid").unwrap();

        assert_eq!(session_id.as_str(), "not-a-uuid");
    }
}
