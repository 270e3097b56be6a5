//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie only ever carries a [`SessionToken`]; turning it back into a
//! member is the session gate's job, never the handler's.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::ports::SessionGate;
use crate::domain::{Error, SessionToken, User};

pub(crate) const SESSION_TOKEN_KEY: &str = "user";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `token` in a freshly renewed session.
    pub fn persist_user(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_TOKEN_KEY, token.as_str())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Token held by the session, if any.
    pub fn token(&self) -> Result<Option<SessionToken>, Error> {
        self.0
            .get::<String>(SESSION_TOKEN_KEY)
            .map(|raw| raw.map(SessionToken::new))
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Drop every value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Resolve the session to a member through `gate`.
    ///
    /// A missing token is checked like any other, so every request goes
    /// through the same validation.
    pub async fn authenticate(&self, gate: &dyn SessionGate) -> Result<User, Error> {
        let token = self.token()?.unwrap_or_else(|| {
            debug!("request carries no session token");
            SessionToken::new("")
        });
        gate.authenticate(&token).await
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
