use std::net::SocketAddr;
use std::sync::Arc;

use counter_backend::{
    auth::{GoogleProvider, IdentityProvider},
    config::AppConfig,
    db,
    routes::build_router,
    store::{CounterStore, MemoryCounterStore, PgCounterStore},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    tracing::info!("Starting counter backend");

    let store: Arc<dyn CounterStore> = match &config.database_url {
        Some(url) => {
            let pool = db::establish_connection_pool(url)?;
            tracing::info!("Database connection pool initialized");
            Arc::new(PgCounterStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, counters are kept in memory only");
            Arc::new(MemoryCounterStore::new())
        }
    };

    let http = reqwest::Client::new();
    let identity: Arc<dyn IdentityProvider> =
        Arc::new(GoogleProvider::new(&config.auth, http.clone()));

    let state = AppState {
        auth_config: Arc::new(config.auth.clone()),
        store,
        identity,
        http,
        posts_url: config.posts_url.clone(),
        posts_limit: config.posts_limit,
    };

    let app = build_router(state, &config.client_url);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
