//! Classification service outbound adapter.
//!
//! A thin HTTP implementation of the `ClassificationSource` port against the
//! OCLC Classify XML API.

mod dto;
mod http_source;

pub use http_source::{ClassifyHttpSource, DEFAULT_CLASSIFY_BASE_URL, DEFAULT_CLASSIFY_TIMEOUT};
