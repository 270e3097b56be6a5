//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **classify**: reqwest client for the Classify XML API
//! - **credentials**: bcrypt password hashing
//! - **memory**: in-process store used when no database is configured
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod classify;
pub mod credentials;
pub mod memory;
pub mod persistence;

pub use credentials::{BcryptCredentialHasher, DEFAULT_BCRYPT_COST};
pub use memory::InMemoryStore;
