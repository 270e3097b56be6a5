//! Port abstraction for collection storage.
//!
//! Adapters execute the plain-data queries built in
//! [`crate::domain::collection_query`]; they never see raw request text.

use async_trait::async_trait;

use crate::domain::{CatalogEntry, ListQuery, NewCatalogEntry, RemoveOutcome, RemoveQuery};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by collection adapters.
    pub enum CollectionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "collection repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "collection repository query failed: {message}",
    }
}

/// Owner-scoped collection storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Entries matching `query`, in the order it requests.
    async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<CatalogEntry>, CollectionPersistenceError>;

    /// Store a new entry and return it with its assigned id.
    async fn insert(
        &self,
        entry: &NewCatalogEntry,
    ) -> Result<CatalogEntry, CollectionPersistenceError>;

    /// Delete the entry named by `query` if the owner matches.
    async fn remove(
        &self,
        query: &RemoveQuery,
    ) -> Result<RemoveOutcome, CollectionPersistenceError>;
}
