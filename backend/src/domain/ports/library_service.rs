//! Driving port for collection use-cases.

use async_trait::async_trait;

use crate::domain::{
    CatalogEntry, ClassificationRange, EntryId, Error, SearchResult, SortKey, User, WorkId,
};

/// Search, add, remove and list on behalf of an authenticated member.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryService: Send + Sync {
    /// Search the classification service by title.
    async fn search(&self, user: &User, query: &str) -> Result<Vec<SearchResult>, Error>;

    /// Resolve `work_id` and add it to the member's collection.
    async fn add_book(&self, user: &User, work_id: &WorkId) -> Result<CatalogEntry, Error>;

    /// Remove one of the member's own entries.
    async fn remove_book(&self, user: &User, entry_id: EntryId) -> Result<(), Error>;

    /// The member's collection, sorted and optionally filtered.
    async fn list_books(
        &self,
        user: &User,
        sort: SortKey,
        filter: Option<ClassificationRange>,
    ) -> Result<Vec<CatalogEntry>, Error>;
}
