//! Collection service: search, add, remove and list for one member.
//!
//! Implements the [`LibraryService`] driving port over a classification
//! source and a collection repository. Every operation is scoped to the
//! member it is given; the caller is responsible for having authenticated it.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::collection_query::{build_list_query, build_remove_query};
use crate::domain::ports::{
    ClassificationSource, ClassificationSourceError, CollectionPersistenceError,
    CollectionRepository, LibraryService,
};
use crate::domain::{
    CatalogEntry, ClassificationRange, EntryId, Error, NewCatalogEntry, RemoveOutcome,
    SearchResult, SortKey, User, WorkId,
};

/// [`LibraryService`] over injected adapters.
#[derive(Clone)]
pub struct LibraryServiceImpl<C, R> {
    source: Arc<C>,
    collection: Arc<R>,
}

impl<C, R> LibraryServiceImpl<C, R> {
    /// Create a new service with the given adapters.
    pub fn new(source: Arc<C>, collection: Arc<R>) -> Self {
        Self { source, collection }
    }
}

impl<C, R> LibraryServiceImpl<C, R>
where
    C: ClassificationSource,
    R: CollectionRepository,
{
    fn map_source_error(error: ClassificationSourceError) -> Error {
        warn!(%error, "classification service call failed");
        Error::upstream_unavailable("classification service unavailable")
    }

    fn map_collection_error(error: CollectionPersistenceError) -> Error {
        match error {
            CollectionPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("collection repository unavailable: {message}"))
            }
            CollectionPersistenceError::Query { message } => {
                Error::internal(format!("collection repository error: {message}"))
            }
        }
    }
}

#[async_trait]
impl<C, R> LibraryService for LibraryServiceImpl<C, R>
where
    C: ClassificationSource,
    R: CollectionRepository,
{
    async fn search(&self, _user: &User, query: &str) -> Result<Vec<SearchResult>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.source
            .search_by_title(query)
            .await
            .map_err(Self::map_source_error)
    }

    async fn add_book(&self, user: &User, work_id: &WorkId) -> Result<CatalogEntry, Error> {
        let lookup = self
            .source
            .lookup_by_work_id(work_id)
            .await
            .map_err(Self::map_source_error)?;
        let entry = self
            .collection
            .insert(&NewCatalogEntry::from_lookup(user.id(), lookup))
            .await
            .map_err(Self::map_collection_error)?;
        info!(
            user_id = %user.id(),
            entry_id = %entry.id,
            owi = %entry.work_id,
            "added book to collection"
        );
        Ok(entry)
    }

    async fn remove_book(&self, user: &User, entry_id: EntryId) -> Result<(), Error> {
        let query = build_remove_query(user, entry_id);
        let outcome = self
            .collection
            .remove(&query)
            .await
            .map_err(Self::map_collection_error)?;
        match outcome {
            RemoveOutcome::Removed => {
                info!(user_id = %user.id(), entry_id = %entry_id, "removed book from collection");
                Ok(())
            }
            RemoveOutcome::NotOwned => Err(Error::forbidden("book is not in your collection")
                .with_details(json!({ "bookId": entry_id.get() }))),
        }
    }

    async fn list_books(
        &self,
        user: &User,
        sort: SortKey,
        filter: Option<ClassificationRange>,
    ) -> Result<Vec<CatalogEntry>, Error> {
        let query = build_list_query(user, sort, filter);
        self.collection
            .list(&query)
            .await
            .map_err(Self::map_collection_error)
    }
}

#[cfg(test)]
#[path = "library_service_tests.rs"]
mod tests;
