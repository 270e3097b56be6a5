//! Server settings loaded via OrthoConfig and the resolved server config.

use std::net::SocketAddr;
use std::time::Duration;

use mockable::Env;
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use bookshelf::inbound::http::session_config::SessionSettings;
use bookshelf::outbound::DEFAULT_BCRYPT_COST;
use bookshelf::outbound::classify::{DEFAULT_CLASSIFY_BASE_URL, DEFAULT_CLASSIFY_TIMEOUT};
use bookshelf::outbound::persistence::{DbPool, PoolConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
const PORT_ENV: &str = "PORT";
const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Raw settings from CLI flags, `BOOKSHELF_*` variables and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSHELF")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Classify endpoint.
    pub classify_base_url: Option<String>,
    /// Whole-request timeout for Classify calls.
    pub classify_timeout_secs: Option<u64>,
    /// bcrypt work factor for new passwords.
    #[ortho_config(default = DEFAULT_BCRYPT_COST)]
    pub bcrypt_cost: u32,
}

/// Invalid values in [`ServerSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        /// Offending text.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// The Classify endpoint is not an absolute URL.
    #[error("invalid classify base URL '{value}': {source}")]
    ClassifyUrl {
        /// Offending text.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// A zero timeout would fail every upstream call.
    #[error("classify timeout must be at least one second")]
    ZeroTimeout,
}

impl ServerSettings {
    /// Fill unset values from the platform's `PORT` and `DATABASE_URL`.
    ///
    /// `BOOKSHELF_*` values always win; `PORT` binds every interface.
    #[must_use]
    pub fn with_platform_env<E: Env>(mut self, env: &E) -> Self {
        if self.bind_addr.is_none() {
            self.bind_addr = env
                .string(PORT_ENV)
                .map(|port| format!("0.0.0.0:{}", port.trim()));
        }
        if self.database_url.is_none() {
            self.database_url = env.string(DATABASE_URL_ENV);
        }
        self
    }

    /// Address to bind, defaulting to `0.0.0.0:4000`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Classify endpoint, defaulting to the public OCLC service.
    pub fn classify_base_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .classify_base_url
            .as_deref()
            .unwrap_or(DEFAULT_CLASSIFY_BASE_URL);
        Url::parse(value).map_err(|source| SettingsError::ClassifyUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Classify request timeout, defaulting to ten seconds.
    pub fn classify_timeout(&self) -> Result<Duration, SettingsError> {
        match self.classify_timeout_secs {
            None => Ok(DEFAULT_CLASSIFY_TIMEOUT),
            Some(0) => Err(SettingsError::ZeroTimeout),
            Some(secs) => Ok(Duration::from_secs(secs)),
        }
    }

    /// bcrypt cost, defaulting to the library default.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().map(str::trim)?;
        if url.is_empty() {
            return None;
        }
        let config = PoolConfig::new(url);
        Some(match self.db_max_connections {
            Some(max) => config.with_max_size(max),
            None => config,
        })
    }
}

/// Fully resolved configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) classify_base_url: Url,
    pub(crate) classify_timeout: Duration,
    pub(crate) bcrypt_cost: u32,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Resolve `settings` alongside validated session settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for unparseable values.
    pub fn from_settings(
        settings: &ServerSettings,
        session: SessionSettings,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            session,
            bind_addr: settings.bind_addr()?,
            classify_base_url: settings.classify_base_url()?,
            classify_timeout: settings.classify_timeout()?,
            bcrypt_cost: settings.bcrypt_cost(),
            db_pool: None,
        })
    }

    /// Use PostgreSQL-backed repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
