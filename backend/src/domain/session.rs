//! Opaque session token exchanged with the transport session store.

use std::fmt;

use super::{User, UserId, UserValidationError};

/// Text persisted in the session cookie to identify a member.
///
/// Carries no authority on its own: it only names a candidate identity that
/// [`crate::domain::ports::SessionGate::authenticate`] must confirm.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap raw session text as received from the transport.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Token naming `user`.
    pub fn for_user(user: &User) -> Self {
        Self(user.id().to_string())
    }

    /// The raw token text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Candidate member id carried by the token.
    pub fn user_id(&self) -> Result<UserId, UserValidationError> {
        self.0.parse()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}
