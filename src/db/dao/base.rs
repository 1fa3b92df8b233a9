use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, ModelTrait, PrimaryKeyTrait, QueryOrder, TryIntoModel,
};

use super::base_traits::{HasIdActiveModel, HasIdColumn};
use super::error::{DaoLayerError, DaoResult};

/// Narrow storage contract over a single entity keyed by an `i64` id.
///
/// `save` inserts when the primary key is unset and updates in place
/// otherwise. Callers that need to tell "missing" apart from "deleted" check
/// `exists_by_id` before calling `delete_by_id`.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized {
    type Entity: EntityTrait<
            Model = Self::Model,
            ActiveModel = Self::ActiveModel,
            PrimaryKey = Self::PrimaryKey,
        > + HasIdColumn
        + Send
        + Sync;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Send
        + Sync
        + 'static;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + TryIntoModel<Self::Model>
        + HasIdActiveModel
        + Send
        + 'static;
    type PrimaryKey: PrimaryKeyTrait<ValueType = i64>;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    async fn find_all(&self) -> DaoResult<Vec<Self::Model>> {
        Ok(Self::Entity::find()
            .order_by_asc(Self::Entity::id_column())
            .all(self.db())
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> DaoResult<Option<Self::Model>> {
        Ok(Self::Entity::find_by_id(id).one(self.db()).await?)
    }

    async fn save(&self, active: Self::ActiveModel) -> DaoResult<Self::Model> {
        let saved = active.save(self.db()).await?;
        Ok(saved.try_into_model()?)
    }

    async fn exists_by_id(&self, id: i64) -> DaoResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn delete_by_id(&self, id: i64) -> DaoResult<()> {
        let result = Self::Entity::delete_by_id(id).exec(self.db()).await?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: std::any::type_name::<Self::Entity>(),
                id,
            });
        }

        Ok(())
    }
}
