//! PostgreSQL-backed `CollectionRepository` implementation using Diesel ORM.
//!
//! Owner ids, filter bounds and entry ids are always bound parameters. The
//! sort key selects one of a fixed set of `ORDER BY` clauses.

use async_trait::async_trait;
use diesel::dsl::{And, Eq as SqlEq, Filter};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{CollectionPersistenceError, CollectionRepository};
use crate::domain::{
    CatalogEntry, ClassificationCode, EntryId, ListQuery, NewCatalogEntry, RemoveOutcome,
    RemoveQuery, SortKey, UserId, WorkId,
};

use super::error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{BookRow, NewBookRow};
use super::pool::DbPool;
use super::schema::books;

/// Diesel-backed implementation of the `CollectionRepository` port.
#[derive(Clone)]
pub struct DieselCollectionRepository {
    pool: DbPool,
}

impl DieselCollectionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CollectionPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CollectionPersistenceError::connection(message),
        DieselFailure::UniqueViolation => {
            CollectionPersistenceError::query("unique constraint violated")
        }
        DieselFailure::Query(message) => CollectionPersistenceError::query(message),
    }
}

fn row_to_entry(row: BookRow) -> Result<CatalogEntry, CollectionPersistenceError> {
    let corrupt = |field: &str, err: String| {
        warn!(book_id = row.id, field, "stored book row is invalid");
        CollectionPersistenceError::query(err)
    };
    let id = EntryId::new(row.id).map_err(|err| corrupt("id", err.to_string()))?;
    let owner = UserId::new(row.user_id).map_err(|err| corrupt("user_id", err.to_string()))?;
    let work_id = WorkId::new(&row.owi).map_err(|err| corrupt("owi", err.to_string()))?;
    let classification = ClassificationCode::new(&row.classification)
        .map_err(|err| corrupt("classification", err.to_string()))?;
    Ok(CatalogEntry {
        id,
        title: row.title,
        author: row.author,
        work_id,
        classification,
        added_at: row.created_at,
        owner,
    })
}

/// Owner-scoped, optionally filtered and ordered listing statement.
fn list_statement(query: &ListQuery) -> books::BoxedQuery<'static, Pg> {
    let mut statement = books::table
        .filter(books::user_id.eq(query.owner.get()))
        .into_boxed();
    if let Some(range) = query.filter {
        statement = statement
            .filter(books::classification_class.ge(range.lower()))
            .filter(books::classification_class.lt(range.upper_exclusive()));
    }
    match query.sort {
        SortKey::Title => statement.order((books::title.asc(), books::id.asc())),
        SortKey::Author => statement.order((books::author.asc(), books::id.asc())),
        SortKey::Classification => {
            statement.order((books::classification.asc(), books::id.asc()))
        }
    }
}

type OwnedEntry = Filter<books::table, And<SqlEq<books::id, i64>, SqlEq<books::user_id, i64>>>;

/// The single row named by `query`, if its owner matches.
fn owned_entry(query: &RemoveQuery) -> OwnedEntry {
    books::table.filter(
        books::id
            .eq(query.entry.get())
            .and(books::user_id.eq(query.owner.get())),
    )
}

#[async_trait]
impl CollectionRepository for DieselCollectionRepository {
    async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<CatalogEntry>, CollectionPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CollectionPersistenceError::connection))?;

        let rows: Vec<BookRow> = list_statement(query)
            .select(BookRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_entry).collect()
    }

    async fn insert(
        &self,
        entry: &NewCatalogEntry,
    ) -> Result<CatalogEntry, CollectionPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CollectionPersistenceError::connection))?;

        let row: BookRow = diesel::insert_into(books::table)
            .values(&NewBookRow {
                user_id: entry.owner.get(),
                title: &entry.title,
                author: &entry.author,
                owi: entry.work_id.as_ref(),
                classification: entry.classification.as_ref(),
                classification_class: entry.classification.class_number(),
            })
            .returning(BookRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_entry(row)
    }

    async fn remove(
        &self,
        query: &RemoveQuery,
    ) -> Result<RemoveOutcome, CollectionPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CollectionPersistenceError::connection))?;

        let deleted = diesel::delete(owned_entry(query))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(if deleted == 0 {
            RemoveOutcome::NotOwned
        } else {
            RemoveOutcome::Removed
        })
    }
}
