use sea_orm::DatabaseConnection;

use super::DaoBase;
use crate::db::entities::todo;

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = todo::Entity;
    type Model = todo::Model;
    type ActiveModel = todo::ActiveModel;
    type PrimaryKey = todo::PrimaryKey;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
