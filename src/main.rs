use std::{net::SocketAddr, sync::Arc};

use moviequiz_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{providers::tmdb::TmdbProvider, CandidateSource, RateLimiter},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("moviequiz_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.catalog_timeout(),
    )?;
    let catalog = CandidateSource::new(Arc::new(provider), config.catalog_timeout());

    let rate_limiter = RateLimiter::new(config.daily_request_limit);
    let _sweeper = rate_limiter.spawn_sweeper(config.rate_limit_sweep_interval());

    let state = Arc::new(AppState::new(
        catalog,
        rate_limiter,
        config.tmdb_image_base_url.clone(),
    ));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        address = %addr,
        daily_limit = config.daily_request_limit,
        "Server running"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
