//! Handler tests for registration, login and logout.

use super::*;
use crate::domain::ports::{MockLibraryService, MockSessionGate};
use crate::domain::{ErrorCode, SessionToken};
use crate::inbound::http::test_utils::{
    SESSION_COOKIE, ada, mocked_state, session_cookie, test_session_middleware,
};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::Value;

fn test_app(
    gate: MockSessionGate,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(mocked_state(gate, MockLibraryService::new()))
        .service(register)
        .service(login)
        .service(logout)
}

fn form_post(uri: &str, body: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri(uri)
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload(body.to_owned())
}

#[actix_web::test]
async fn login_sets_an_encrypted_session() {
    let mut gate = MockSessionGate::new();
    gate.expect_verify_credentials()
        .withf(|creds| creds.username().as_ref() == "ada" && creds.password() == "s3cret")
        .times(1)
        .returning(|_| Ok(ada()));
    gate.expect_issue_session()
        .times(1)
        .returning(SessionToken::for_user);
    let app = actix_test::init_service(test_app(gate)).await;

    let res = actix_test::call_service(
        &app,
        form_post("/auth/login", "username=ada&password=s3cret").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);
    assert_eq!(cookie.name(), SESSION_COOKIE);
    assert_ne!(cookie.value(), "5");
    assert_eq!(cookie.http_only(), Some(true));
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["username"], "ada");
    assert_eq!(body["id"], 5);
    assert!(body.get("passwordHash").is_none());
}

#[actix_web::test]
async fn failed_login_sets_no_session() {
    let mut gate = MockSessionGate::new();
    gate.expect_verify_credentials()
        .returning(|_| Err(Error::unauthorized("invalid credentials")));
    gate.expect_issue_session().never();
    let app = actix_test::init_service(test_app(gate)).await;

    let res = actix_test::call_service(
        &app,
        form_post("/auth/login", "username=ada&password=wrong").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(
        res.response()
            .cookies()
            .all(|cookie| cookie.name() != SESSION_COOKIE)
    );
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "invalid credentials");
}

#[rstest]
#[case("username=&password=x", "username", "empty_username")]
#[case("password=x", "username", "empty_username")]
#[case("username=ada&password=", "password", "empty_password")]
#[case("username=a%20da&password=x", "username", "invalid_username")]
#[actix_rt::test]
async fn invalid_forms_are_rejected_before_the_gate(
    #[case] body: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut gate = MockSessionGate::new();
    gate.expect_verify_credentials().never();
    let app = actix_test::init_service(test_app(gate)).await;

    let res = actix_test::call_service(&app, form_post("/auth/login", body).to_request()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["code"], serde_json::json!(ErrorCode::InvalidRequest));
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], code);
}

#[actix_web::test]
async fn register_creates_and_signs_in() {
    let mut gate = MockSessionGate::new();
    gate.expect_register()
        .withf(|creds| creds.username().as_ref() == "ada")
        .times(1)
        .returning(|_| Ok(ada()));
    gate.expect_issue_session()
        .times(1)
        .returning(SessionToken::for_user);
    let app = actix_test::init_service(test_app(gate)).await;

    let res = actix_test::call_service(
        &app,
        form_post("/auth/register", "username=ada&password=s3cret").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let _cookie = session_cookie(&res);
}

#[actix_web::test]
async fn duplicate_registration_is_a_conflict() {
    let mut gate = MockSessionGate::new();
    gate.expect_register()
        .returning(|_| Err(Error::conflict("username already taken")));
    let app = actix_test::init_service(test_app(gate)).await;

    let res = actix_test::call_service(
        &app,
        form_post("/auth/register", "username=ada&password=s3cret").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn logout_without_a_session_is_no_content() {
    let app = actix_test::init_service(test_app(MockSessionGate::new())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post().uri("/auth/logout").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}
