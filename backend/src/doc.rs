//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{CatalogEntry, Error, ErrorCode, SearchResult, User};
use crate::inbound::http::auth::CredentialsForm;
use crate::inbound::http::library::{BookForm, CollectionResponse, SearchResponse};
use crate::inbound::http::session_config::SESSION_COOKIE;

struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE,
                "Encrypted session cookie issued by POST /auth/login or /auth/register.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "Bookshelf API",
        description = "Personal library catalogue classified through OCLC Classify."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::library::search,
        crate::inbound::http::library::add_book,
        crate::inbound::http::library::remove_book,
        crate::inbound::http::library::list_books,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Error,
        ErrorCode,
        SearchResult,
        CatalogEntry,
        CredentialsForm,
        BookForm,
        SearchResponse,
        CollectionResponse
    )),
    tags(
        (name = "auth", description = "Registration and sessions"),
        (name = "library", description = "Searching and managing a collection"),
        (name = "health", description = "Orchestration probes")
    )
)]
/// Aggregated OpenAPI description of every route and schema.
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).unwrap_or_else(|| panic!("{name} schema")) {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("/auth/login")]
    #[case("/auth/register")]
    #[case("/auth/logout")]
    #[case("/search")]
    #[case("/addbook")]
    #[case("/removebook")]
    #[case("/")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path), "{path}");
    }

    #[test]
    fn catalog_entry_hides_the_owner() {
        let fields = schema_fields("CatalogEntry");
        assert!(fields.contains(&"workId".to_owned()));
        assert!(fields.contains(&"addedAt".to_owned()));
        assert!(!fields.iter().any(|field| field == "owner"));
    }

    #[test]
    fn error_schema_has_code_and_message() {
        let fields = schema_fields("Error");
        assert!(fields.contains(&"code".to_owned()));
        assert!(fields.contains(&"message".to_owned()));
    }
}
