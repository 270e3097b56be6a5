//! bcrypt implementation of the `CredentialHasher` port.

use crate::domain::PasswordHash;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

const DUMMY_PASSWORD: &str = "bookshelf-dummy-credential";

/// Salted bcrypt hashing with a fixed cost.
pub struct BcryptCredentialHasher {
    cost: u32,
    dummy: PasswordHash,
}

impl BcryptCredentialHasher {
    /// Build a hasher; precomputes the dummy hash at the same cost.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialHashError::Hashing`] when `cost` is outside the
    /// range bcrypt accepts (4 to 31).
    pub fn new(cost: u32) -> Result<Self, CredentialHashError> {
        let dummy = bcrypt::hash(DUMMY_PASSWORD, cost)
            .map_err(|err| CredentialHashError::hashing(err.to_string()))?;
        Ok(Self {
            cost,
            dummy: PasswordHash::new(dummy),
        })
    }
}

impl CredentialHasher for BcryptCredentialHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHashError> {
        bcrypt::hash(password, self.cost)
            .map(PasswordHash::new)
            .map_err(|err| CredentialHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, CredentialHashError> {
        bcrypt::verify(password, hash.as_str())
            .map_err(|err| CredentialHashError::malformed_hash(err.to_string()))
    }

    fn dummy_hash(&self) -> PasswordHash {
        self.dummy.clone()
    }
}
