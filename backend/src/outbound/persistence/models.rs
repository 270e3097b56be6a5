//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; the domain never sees
//! these types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{books, users};

/// Row read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Insertable user record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Row read from the books table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub author: String,
    pub owi: String,
    pub classification: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable book record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub(crate) struct NewBookRow<'a> {
    pub user_id: i64,
    pub title: &'a str,
    pub author: &'a str,
    pub owi: &'a str,
    pub classification: &'a str,
    pub classification_class: Option<i64>,
}
