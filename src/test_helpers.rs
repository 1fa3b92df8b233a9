use std::sync::Arc;

use axum::Router;

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    middleware::catch_panic_layer,
    routes::router,
    state::AppState,
};

pub const IN_MEMORY_SQLITE_URL: &str = "sqlite::memory:";

/// Fresh state backed by a private in-memory SQLite database with the
/// schema already synced.
pub async fn test_state() -> Arc<AppState> {
    let cfg = AppConfig {
        database: DatabaseConfig {
            url: IN_MEMORY_SQLITE_URL.to_string(),
            max_connections: 1,
            min_idle: 1,
        },
        ..AppConfig::default()
    };
    let db = connection::connect(&cfg.database)
        .await
        .expect("connect to in-memory sqlite");
    AppState::new(cfg, db)
}

pub async fn test_router() -> Router {
    router(test_state().await).layer(catch_panic_layer())
}
