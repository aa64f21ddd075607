use tracing::{Level, info};

use glsite_server::config::AppConfig;
use glsite_server::state::AppState;
use glsite_server::upload::store::UploadStore;
use glsite_server::{build_router, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    // Fail fast: a backend without a usable store should not come up.
    let db = database::init_db(&config.database.url).await?;
    info!("database connected");

    let uploads = UploadStore::new(&config.uploads.dir);
    uploads.ensure_root().await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        uploads,
        config,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
