use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use community::DbIdentityProvider;
use tracing::{Level, info};

use server::config::AppConfig;
use server::database::init_db;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("failed to load configuration")?;
    if !config.community.enabled {
        info!("Community sharing is disabled; endpoints will answer FEATURE_DISABLED");
    }

    let db = init_db(&config.database)
        .await
        .context("failed to initialize database")?;
    let identity = Arc::new(DbIdentityProvider::new(db.clone()));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;

    let state = AppState::new(db, identity, config);
    let app = server::build_router(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
