//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, config::CookieContentSecurity, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};
use std::sync::Arc;

use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::ports::{MockLibraryService, MockSessionGate};
use crate::domain::{Error, SessionToken, User, UserId, Username};

pub use super::session_config::SESSION_COOKIE;

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per call, private (encrypted) cookie content and no
/// `Secure` flag so plain-HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_secure(false)
        .build()
}

/// Wrap mocked ports into handler state.
pub fn mocked_state(gate: MockSessionGate, library: MockLibraryService) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(gate), Arc::new(library)))
}

/// Member used across handler tests.
pub fn ada() -> User {
    User::new(
        UserId::new(5).expect("valid id"),
        Username::new("ada").expect("valid username"),
    )
}

/// Gate that accepts exactly `ada`'s session and rejects everything else.
pub fn gate_for_ada() -> MockSessionGate {
    let mut gate = MockSessionGate::new();
    gate.expect_authenticate().returning(|token| {
        if token.as_str() == "5" {
            Ok(ada())
        } else {
            Err(Error::unauthorized("login required"))
        }
    });
    gate.expect_issue_session()
        .returning(SessionToken::for_user);
    gate
}

/// Path of the route registered by [`seed_ada_session`].
pub const SEED_SESSION_PATH: &str = "/__test/session";

/// Handler that stores `ada`'s token so later requests carry a valid cookie.
pub async fn seed_ada_session(session: SessionContext) -> Result<HttpResponse, Error> {
    session.persist_user(&SessionToken::for_user(&ada()))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Session cookie set by `response`.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}
