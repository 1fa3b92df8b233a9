use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tower_http::trace::TraceLayer;

use todo_api::{
    config::{AppConfig, defaults::DEFAULT_RUST_LOG},
    db::connection,
    logging::init_tracing,
    middleware::catch_panic_layer,
    routes::router,
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        if tracing::dispatcher::has_been_set() {
            tracing::error!("server failed: {err:?}");
        } else {
            eprintln!("server failed: {err:?}");
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Tracing comes up even when the config is bad so the failure gets logged.
    let cfg = AppConfig::from_env();
    let log_level = cfg
        .as_ref()
        .map_or(DEFAULT_RUST_LOG, |cfg| cfg.logging.rust_log.as_str());
    init_tracing(log_level)?;
    let cfg = cfg.context("failed to load config")?;

    let db = connection::connect(&cfg.database).await?;
    let state = AppState::new(cfg, db);

    let app = Router::new()
        .merge(router(Arc::clone(&state)))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", state.config.general.host, state.config.general.port)
        .parse()
        .context("invalid host/port")?;
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
