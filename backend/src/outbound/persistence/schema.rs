//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered members.
    users (id) {
        /// Primary key, assigned by the sequence.
        id -> Int8,
        /// Unique login name.
        username -> Varchar,
        /// bcrypt-encoded credential.
        password_hash -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Collection entries, one row per book per member.
    books (id) {
        /// Primary key, assigned by the sequence.
        id -> Int8,
        /// Owning member.
        user_id -> Int8,
        title -> Varchar,
        author -> Varchar,
        /// Online Work Identifier.
        owi -> Varchar,
        /// Classification code as recommended upstream.
        classification -> Varchar,
        /// Integer class number derived from `classification`, for range filters.
        classification_class -> Nullable<Int8>,
        /// Insertion timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(books -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(books, users);
