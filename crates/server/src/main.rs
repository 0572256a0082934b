use anyhow::{Context, Result};
use category_server::handler::AppRouter;
use shared::{
    config::{Config, ConnectionManager, StoreKind},
    state::AppState,
    utils::{Telemetry, init_logger},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    init_logger();

    let config = Config::init().context("Failed to load configuration")?;

    let tracer_provider = config
        .trace_stdout
        .then(|| Telemetry::new("category-server").init_tracer());

    let state = match config.store {
        StoreKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is not set")?;

            let db_pool = ConnectionManager::new_pool(
                database_url,
                config.db_max_connections,
                config.ensure_schema,
            )
            .await
            .context("Failed to initialize database pool")?;

            AppState::new(db_pool).await
        }
        StoreKind::Memory => {
            info!("Using the in-memory category store");
            AppState::in_memory().await
        }
    };

    AppRouter::serve(config.port, state).await?;

    if let Some(tracer_provider) = tracer_provider {
        if let Err(e) = tracer_provider.shutdown() {
            anyhow::bail!("Failed to shutdown tracer provider: {e}");
        }
    }

    Ok(())
}
