//! Bookshelf server entry point.

mod server;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookshelf::inbound::http::session_config::{BuildMode, session_settings_from_env};
use bookshelf::outbound::persistence::DbPool;
use server::{ServerConfig, ServerSettings, create_server, health_state_for};

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let settings = ServerSettings::load()?.with_platform_env(&env);
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())?;
    let mut config = ServerConfig::from_settings(&settings, session)?;
    if let Some(pool_config) = settings.pool_config() {
        let pool = DbPool::new(pool_config).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = health_state_for(&config);
    let bind_addr = config.bind_addr;
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "bookshelf listening");
    server.await?;
    Ok(())
}
