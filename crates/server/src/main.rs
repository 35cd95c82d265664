use std::sync::Arc;

use anyhow::Context;
use db::{
    DBService,
    provider::{DataProvider, LocalDataProvider, SqlDataProvider},
};
use server::{AppState, config::{Config, ProviderKind}, create_router};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    utils::logging::init_tracing();

    let config = Config::from_env()?;

    let provider: Arc<dyn DataProvider> = match config.provider {
        ProviderKind::Local => match &config.data_file {
            Some(path) => Arc::new(LocalDataProvider::with_snapshot(path.clone()).await?),
            None => Arc::new(LocalDataProvider::new()),
        },
        ProviderKind::Sqlite => {
            let db = DBService::new(&config.database_url)
                .await
                .with_context(|| format!("connecting to {}", config.database_url))?;
            Arc::new(SqlDataProvider::new(db.pool))
        }
    };

    let state = AppState::new(provider);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(addr = %addr, provider = ?config.provider, "salon server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
