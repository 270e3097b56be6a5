//! Builds the handler state from configured adapters.

use std::sync::Arc;

use std::time::Duration;

use actix_web::web;
use reqwest::Url;

use bookshelf::domain::ports::{
    ClassificationSource, CollectionRepository, CredentialHasher, UserRepository,
};
use bookshelf::domain::{LibraryServiceImpl, SessionGateService};
use bookshelf::inbound::http::state::HttpState;
use bookshelf::outbound::classify::ClassifyHttpSource;
use bookshelf::outbound::persistence::{DieselCollectionRepository, DieselUserRepository};
use bookshelf::outbound::{BcryptCredentialHasher, InMemoryStore};
use tracing::warn;

use super::ServerConfig;

/// Assemble both driving ports over one set of adapters.
fn wire<U, C, H, S>(users: Arc<U>, collection: Arc<C>, hasher: Arc<H>, source: Arc<S>) -> HttpState
where
    U: UserRepository + 'static,
    C: CollectionRepository + 'static,
    H: CredentialHasher + 'static,
    S: ClassificationSource + 'static,
{
    HttpState::new(
        Arc::new(SessionGateService::new(users, hasher)),
        Arc::new(LibraryServiceImpl::new(source, collection)),
    )
}

fn classify_source(base_url: Url, timeout: Duration) -> std::io::Result<ClassifyHttpSource> {
    ClassifyHttpSource::new(base_url, timeout)
        .map_err(|err| std::io::Error::other(format!("classify client: {err}")))
}

/// Diesel repositories when a pool is configured, the in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let hasher = Arc::new(
        BcryptCredentialHasher::new(config.bcrypt_cost)
            .map_err(|err| std::io::Error::other(err.to_string()))?,
    );
    let source = Arc::new(classify_source(
        config.classify_base_url.clone(),
        config.classify_timeout,
    )?);

    let state = match &config.db_pool {
        Some(pool) => wire(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselCollectionRepository::new(pool.clone())),
            hasher,
            source,
        ),
        None => {
            warn!("no database configured; members and collections live in memory");
            let store = Arc::new(InMemoryStore::default());
            wire(Arc::clone(&store), store, hasher, source)
        }
    };
    Ok(web::Data::new(state))
}
