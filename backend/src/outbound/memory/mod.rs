//! In-process store used when no database is configured.
//!
//! Implements both persistence ports over one mutex-guarded state. Contents
//! are lost on restart. The lock is never held across an `.await`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    CollectionPersistenceError, CollectionRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    CatalogEntry, EntryId, ListQuery, NewCatalogEntry, PasswordHash, RemoveOutcome, RemoveQuery,
    StoredUser, User, UserId, Username,
};

#[derive(Default)]
struct StoreState {
    users: BTreeMap<UserId, StoredUser>,
    books: BTreeMap<EntryId, CatalogEntry>,
    last_user_id: i64,
    last_book_id: i64,
}

/// Memory-backed [`UserRepository`] and [`CollectionRepository`].
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryStore {
    /// Empty store stamping entries with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

fn next_id(counter: &mut i64) -> Result<i64, String> {
    *counter = counter
        .checked_add(1)
        .ok_or_else(|| "in-memory store identifiers exhausted".to_owned())?;
    Ok(*counter)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .values()
            .find(|stored| stored.user.username() == username)
            .cloned())
    }

    async fn insert(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if state
            .users
            .values()
            .any(|stored| stored.user.username() == username)
        {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        let raw = next_id(&mut state.last_user_id).map_err(UserPersistenceError::query)?;
        let id = UserId::new(raw).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let user = User::new(id, username.clone());
        state.users.insert(
            id,
            StoredUser {
                user: user.clone(),
                password_hash: password_hash.clone(),
            },
        );
        Ok(user)
    }
}

#[async_trait]
impl CollectionRepository for InMemoryStore {
    async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<CatalogEntry>, CollectionPersistenceError> {
        let state = self.lock().map_err(CollectionPersistenceError::query)?;
        let mut entries: Vec<CatalogEntry> = state
            .books
            .values()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect();
        entries.sort_by(|a, b| query.compare(a, b));
        Ok(entries)
    }

    async fn insert(
        &self,
        entry: &NewCatalogEntry,
    ) -> Result<CatalogEntry, CollectionPersistenceError> {
        let added_at = self.clock.utc();
        let mut state = self.lock().map_err(CollectionPersistenceError::query)?;
        let raw = next_id(&mut state.last_book_id).map_err(CollectionPersistenceError::query)?;
        let id =
            EntryId::new(raw).map_err(|err| CollectionPersistenceError::query(err.to_string()))?;
        let stored = entry.clone().into_entry(id, added_at);
        state.books.insert(id, stored.clone());
        Ok(stored)
    }

    async fn remove(
        &self,
        query: &RemoveQuery,
    ) -> Result<RemoveOutcome, CollectionPersistenceError> {
        let mut state = self.lock().map_err(CollectionPersistenceError::query)?;
        let owned = state
            .books
            .get(&query.entry)
            .is_some_and(|entry| entry.owner == query.owner);
        if !owned {
            return Ok(RemoveOutcome::NotOwned);
        }
        state.books.remove(&query.entry);
        Ok(RemoveOutcome::Removed)
    }
}
