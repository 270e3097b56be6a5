//! Registration, login and logout handlers.
//!
//! ```text
//! POST /auth/register username=ada&password=s3cret
//! POST /auth/login    username=ada&password=s3cret
//! POST /auth/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::domain::{
    ApiResult, Error, LoginCredentials, LoginValidationError, User, UserValidationError,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body shared by register and login.
///
/// Missing fields decode as empty strings so validation reports them.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CredentialsForm {
    /// Member name, 1 to 64 characters.
    #[serde(default)]
    pub username: String,
    /// Plain-text password; never logged.
    #[serde(default)]
    pub password: String,
}

impl TryFrom<&CredentialsForm> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &CredentialsForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_credentials_error(err: LoginValidationError) -> Error {
    let (field, code) = match &err {
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
        LoginValidationError::Username(UserValidationError::EmptyUsername) => {
            ("username", "empty_username")
        }
        LoginValidationError::Username(UserValidationError::UsernameTooLong { .. }) => {
            ("username", "username_too_long")
        }
        LoginValidationError::Username(_) => ("username", "invalid_username"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn credentials(form: &CredentialsForm) -> ApiResult<LoginCredentials> {
    LoginCredentials::try_from(form).map_err(map_credentials_error)
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Member created", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid username or password", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = credentials(&form)?;
    let user = state.session_gate.register(&credentials).await?;
    session.persist_user(&state.session_gate.issue_session(&user))?;
    Ok(HttpResponse::Created().json(user))
}

/// Check credentials and establish a session.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<web::Json<User>> {
    let credentials = credentials(&form)?;
    let user = state.session_gate.verify_credentials(&credentials).await?;
    session.persist_user(&state.session_gate.issue_session(&user))?;
    info!(user_id = %user.id(), "member signed in");
    Ok(web::Json(user))
}

/// End the session. Succeeds whether or not one existed.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
