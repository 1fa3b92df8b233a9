use sea_orm::{IntoActiveModel, Set};

use crate::{
    db::dao::TodoDao,
    db::entities::todo,
    error::AppError,
    services::crud_service::{CrudErrors, CrudService},
};

#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }

    pub async fn list_todos(&self) -> Result<Vec<todo::Model>, AppError> {
        CrudService::list(self).await
    }

    pub async fn get_todo(&self, id: i64) -> Result<todo::Model, AppError> {
        CrudService::find_by_id(self, id).await
    }

    pub async fn create_todo(
        &self,
        data: impl IntoActiveModel<todo::ActiveModel> + Send,
    ) -> Result<todo::Model, AppError> {
        CrudService::create(self, data).await
    }

    /// Overwrites both mutable fields; there is no partial update.
    pub async fn update_todo(
        &self,
        id: i64,
        description: String,
        completed: bool,
    ) -> Result<todo::Model, AppError> {
        CrudService::update(self, id, move |active| {
            active.description = Set(description);
            active.completed = Set(completed);
        })
        .await
    }

    pub async fn delete_todo(&self, id: i64) -> Result<(), AppError> {
        CrudService::delete(self, id).await
    }
}

impl CrudService for TodoService {
    type Dao = TodoDao;

    fn dao(&self) -> &Self::Dao {
        &self.todo_dao
    }

    fn errors(&self) -> CrudErrors {
        CrudErrors {
            create_failed: "Create todo failed",
            find_failed: "Todo fetch failed",
            not_found: "Todo not found",
            update_failed: "Update todo failed",
            delete_failed: "Delete todo failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};

    use super::TodoService;
    use crate::{db::entities::todo, error::AppError, services::ServiceContext};

    fn service(db: &DatabaseConnection) -> TodoService {
        ServiceContext::new(db).todo()
    }

    #[tokio::test]
    async fn get_todo_maps_missing_row_to_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();

        let err = service(&db)
            .get_todo(1)
            .await
            .expect_err("missing todo should fail");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_todo_on_missing_row_writes_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();

        let err = service(&db)
            .update_todo(999, "b".to_string(), true)
            .await
            .expect_err("missing todo should fail");

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn delete_todo_checks_existence_before_deleting() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();

        let err = service(&db)
            .delete_todo(7)
            .await
            .expect_err("missing todo should fail");

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn storage_failures_become_generic_internal_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".to_string())])
            .into_connection();

        let err = service(&db)
            .list_todos()
            .await
            .expect_err("list should fail");

        match err {
            AppError::Internal(message) => assert_eq!(message, "Todo fetch failed"),
            other => panic!("expected internal error, got {other:?}"),
        }
    }
}
