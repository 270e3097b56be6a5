//! Driving port for identity: sessions, login and registration.
//!
//! Inbound adapters resolve every request's identity through this port and
//! never read user ids straight from the transport.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SessionToken, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionGate: Send + Sync {
    /// Resolve a session token to a member, or fail with `Unauthorized`.
    async fn authenticate(&self, token: &SessionToken) -> Result<User, Error>;

    /// Check a username/password pair.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    async fn verify_credentials(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Create a member and return it.
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Token to persist in the transport session for `user`.
    fn issue_session(&self, user: &User) -> SessionToken;
}
