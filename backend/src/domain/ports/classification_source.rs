//! Driven port for the external bibliographic classification service.
//!
//! The domain owns the result shapes; adapters translate whatever the wire
//! format is into [`SearchResult`] and [`LookupResult`].

use async_trait::async_trait;

use crate::domain::{LookupResult, SearchResult, WorkId};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the classification service.
    pub enum ClassificationSourceError {
        /// The request never produced a readable response (connect, timeout, body read).
        Transport { message: String } =>
            "classification service transport failed: {message}",
        /// The response body was not the expected document.
        Parse { message: String } =>
            "classification service response could not be parsed: {message}",
    }
}

/// Port for searching and resolving works.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassificationSource: Send + Sync {
    /// Works whose title matches `query`, in service order.
    ///
    /// No matches is an empty vector, not an error.
    async fn search_by_title(
        &self,
        query: &str,
    ) -> Result<Vec<SearchResult>, ClassificationSourceError>;

    /// Resolve one work and its most popular classification.
    async fn lookup_by_work_id(
        &self,
        work_id: &WorkId,
    ) -> Result<LookupResult, ClassificationSourceError>;
}
