//! Session gate service: identity resolution, login and registration.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    CredentialHashError, CredentialHasher, SessionGate, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, SessionToken, StoredUser, User};

const LOGIN_REQUIRED: &str = "login required";
const INVALID_CREDENTIALS: &str = "invalid credentials";

/// [`SessionGate`] backed by a user repository and a credential hasher.
#[derive(Clone)]
pub struct SessionGateService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> SessionGateService<U, H> {
    /// Create a gate over the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> SessionGateService<U, H>
where
    U: UserRepository,
    H: CredentialHasher + 'static,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateUsername { username } => {
                Error::conflict("username already taken").with_details(json!({
                    "username": username,
                }))
            }
        }
    }

    fn map_hash_error(error: CredentialHashError) -> Error {
        Error::internal(error.to_string())
    }

    /// Run a hasher operation on the blocking pool.
    async fn with_hasher<T, F>(&self, op: F) -> Result<T, Error>
    where
        F: FnOnce(&H) -> Result<T, CredentialHashError> + Send + 'static,
        T: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || op(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("credential task failed: {err}")))?
            .map_err(Self::map_hash_error)
    }
}

#[async_trait]
impl<U, H> SessionGate for SessionGateService<U, H>
where
    U: UserRepository,
    H: CredentialHasher + 'static,
{
    async fn authenticate(&self, token: &SessionToken) -> Result<User, Error> {
        let Ok(id) = token.user_id() else {
            debug!("session token does not name a user");
            return Err(Error::unauthorized(LOGIN_REQUIRED));
        };
        match self.users.find_by_id(id).await.map_err(Self::map_user_error)? {
            Some(user) => Ok(user),
            None => {
                debug!(user_id = %id, "session names an unknown user");
                Err(Error::unauthorized(LOGIN_REQUIRED))
            }
        }
    }

    async fn verify_credentials(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(Self::map_user_error)?;
        let password = Zeroizing::new(credentials.password().to_owned());

        let Some(StoredUser {
            user,
            password_hash,
        }) = stored
        else {
            // Burn the same verification cost as a real account.
            if let Err(error) = self
                .with_hasher(move |hasher| hasher.verify(&password, &hasher.dummy_hash()))
                .await
            {
                debug!(%error, "dummy credential check failed");
            }
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matched = self
            .with_hasher(move |hasher| hasher.verify(&password, &password_hash))
            .await?;
        if matched {
            Ok(user)
        } else {
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }

    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let password = Zeroizing::new(credentials.password().to_owned());
        let hash = self
            .with_hasher(move |hasher| hasher.hash(&password))
            .await?;
        let user = self
            .users
            .insert(credentials.username(), &hash)
            .await
            .map_err(Self::map_user_error)?;
        info!(user_id = %user.id(), "registered member");
        Ok(user)
    }

    fn issue_session(&self, user: &User) -> SessionToken {
        SessionToken::for_user(user)
    }
}
