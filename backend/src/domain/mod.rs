//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed library entities and the use-cases
//! over them, independent of HTTP, XML and SQL. Adapters live in
//! `inbound` and `outbound` and talk to this layer through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, Username: member identity.
//! - CatalogEntry, SearchResult, LookupResult: catalogue records.
//! - SortKey, ClassificationRange, ListQuery, RemoveQuery: collection queries.
//! - SessionGateService, LibraryServiceImpl: port implementations.

pub mod auth;
pub mod catalog;
pub mod collection_query;
pub mod error;
pub mod library_service;
pub mod ports;
pub mod session;
pub mod session_gate;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::catalog::{
    CatalogEntry, CatalogValidationError, ClassificationCode, EntryId, LookupResult,
    NewCatalogEntry, SearchResult, WorkId,
};
pub use self::collection_query::{
    ClassificationRange, ListQuery, RemoveOutcome, RemoveQuery, SortKey, build_list_query,
    build_remove_query,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::library_service::LibraryServiceImpl;
pub use self::session::SessionToken;
pub use self::session_gate::SessionGateService;
pub use self::trace_id::TraceId;
pub use self::user::{
    PasswordHash, StoredUser, USERNAME_MAX, User, UserId, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use bookshelf::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
