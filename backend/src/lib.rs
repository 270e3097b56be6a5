//! Bookshelf backend library.
//!
//! Members search the OCLC Classify service by title, add works to a
//! personal collection with their most popular classification, and list or
//! prune that collection.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
