//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod classification_source;
mod collection_repository;
mod credential_hasher;
mod library_service;
mod readiness_probe;
mod session_gate;
mod user_repository;

#[cfg(test)]
pub use classification_source::MockClassificationSource;
pub use classification_source::{ClassificationSource, ClassificationSourceError};
#[cfg(test)]
pub use collection_repository::MockCollectionRepository;
pub use collection_repository::{CollectionPersistenceError, CollectionRepository};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use library_service::MockLibraryService;
pub use library_service::LibraryService;
#[cfg(test)]
pub use readiness_probe::MockReadinessProbe;
pub use readiness_probe::{ReadinessError, ReadinessProbe};
#[cfg(test)]
pub use session_gate::MockSessionGate;
pub use session_gate::SessionGate;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
