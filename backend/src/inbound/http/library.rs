//! Collection handlers.
//!
//! ```text
//! GET  /search?search=1984
//! POST /addbook     bookId=<work id>
//! POST /removebook  bookId=<entry id>
//! GET  /?sort=author&filter=800
//! ```
//!
//! Every handler resolves the member through the session gate first.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    ApiResult, CatalogEntry, ClassificationRange, EntryId, Error, SearchResult, SortKey, User,
    WorkId,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

async fn current_user(state: &HttpState, session: &SessionContext) -> ApiResult<User> {
    session.authenticate(state.session_gate.as_ref()).await
}

/// Query string of `GET /search`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Title text. Blank searches return no results.
    pub search: Option<String>,
}

/// Body of a successful search.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    /// The query as received.
    pub query: String,
    /// Works in upstream order.
    pub results: Vec<SearchResult>,
}

/// Search the classification service by title.
#[utoipa::path(
    get,
    path = "/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching works", body = SearchResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 502, description = "Classification service unavailable", body = Error)
    ),
    tags = ["library"],
    operation_id = "search"
)]
#[get("/search")]
pub async fn search(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<SearchResponse>> {
    let user = current_user(&state, &session).await?;
    let query = params.into_inner().search.unwrap_or_default();
    let results = state.library.search(&user, &query).await?;
    Ok(web::Json(SearchResponse { query, results }))
}

/// Form body of `POST /addbook` and `POST /removebook`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookForm {
    /// Work id when adding, entry id when removing.
    #[serde(rename = "bookId", default)]
    pub book_id: String,
}

fn invalid_book_id(message: String, raw: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": "bookId", "value": raw }))
}

/// Look a work up and add it to the member's collection.
#[utoipa::path(
    post,
    path = "/addbook",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Entry added", body = CatalogEntry),
        (status = 400, description = "Missing work id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 502, description = "Classification service unavailable", body = Error)
    ),
    tags = ["library"],
    operation_id = "addBook"
)]
#[post("/addbook")]
pub async fn add_book(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<BookForm>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&state, &session).await?;
    let work_id = WorkId::new(&form.book_id)
        .map_err(|err| invalid_book_id(err.to_string(), &form.book_id))?;
    let entry = state.library.add_book(&user, &work_id).await?;
    Ok(HttpResponse::Created().json(entry))
}

/// Remove one of the member's entries.
#[utoipa::path(
    post,
    path = "/removebook",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 204, description = "Entry removed"),
        (status = 400, description = "Book id is not a positive integer", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Not in the member's collection", body = Error)
    ),
    tags = ["library"],
    operation_id = "removeBook"
)]
#[post("/removebook")]
pub async fn remove_book(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<BookForm>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&state, &session).await?;
    let entry_id = form
        .book_id
        .parse::<EntryId>()
        .map_err(|err| invalid_book_id(err.to_string(), &form.book_id))?;
    state.library.remove_book(&user, entry_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Query string of `GET /`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListParams {
    /// `title`, `author` or `classification`; anything else sorts by title.
    pub sort: Option<String>,
    /// Integer lower bound of a 100-wide class-number window.
    pub filter: Option<String>,
}

/// Body of the collection listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionResponse {
    /// Entries in the requested order.
    pub books: Vec<CatalogEntry>,
}

/// The member's collection.
#[utoipa::path(
    get,
    path = "/",
    params(ListParams),
    responses(
        (status = 200, description = "Collection", body = CollectionResponse),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["library"],
    operation_id = "listBooks"
)]
#[get("/")]
pub async fn list_books(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<CollectionResponse>> {
    let user = current_user(&state, &session).await?;
    let sort = SortKey::parse_or_default(params.sort.as_deref());
    let filter = ClassificationRange::parse(params.filter.as_deref());
    let books = state.library.list_books(&user, sort, filter).await?;
    Ok(web::Json(CollectionResponse { books }))
}

#[cfg(test)]
#[path = "library_tests.rs"]
mod tests;
