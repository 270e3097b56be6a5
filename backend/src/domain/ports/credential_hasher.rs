//! Driven port for one-way password hashing.
//!
//! Implementations are synchronous and CPU bound; callers move them off the
//! async executor.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing or verifying a password.
    pub enum CredentialHashError {
        /// The hashing primitive failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The stored hash is not in a recognised encoding.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Password hashing and verification.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Salt and hash `password`.
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHashError>;

    /// Whether `password` matches `hash`.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, CredentialHashError>;

    /// A valid hash of no real password, verified against when a username
    /// is unknown so both failure paths cost the same.
    fn dummy_hash(&self) -> PasswordHash;
}
