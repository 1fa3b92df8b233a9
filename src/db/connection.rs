use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::default_registry;
use crate::config::DatabaseConfig;

const ENTITY_PATH: &str = "todo_api::db::entities::*";

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = default_registry()?.connect(cfg).await?;

    info!("syncing database schema from entities");
    db.get_schema_registry(ENTITY_PATH).sync(&db).await?;
    Ok(db)
}
