use sea_orm::IntoActiveModel;

use crate::db::dao::{DaoBase, DaoLayerError, HasIdActiveModel};
use crate::error::AppError;

type CrudModel<S> = <<S as CrudService>::Dao as DaoBase>::Model;
type CrudActiveModel<S> = <<S as CrudService>::Dao as DaoBase>::ActiveModel;

#[derive(Clone, Copy)]
pub struct CrudErrors {
    pub create_failed: &'static str,
    pub find_failed: &'static str,
    pub not_found: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
}

impl Default for CrudErrors {
    fn default() -> Self {
        Self {
            create_failed: "Create failed",
            find_failed: "Find failed",
            not_found: "Resource not found",
            update_failed: "Update failed",
            delete_failed: "Delete failed",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum CrudOp {
    Create,
    Find,
    List,
    Update,
    Delete,
}

/// Request-level CRUD on top of a [`DaoBase`]. Missing rows become
/// `AppError::NotFound`; storage failures are logged and become
/// `AppError::Internal` with a message that names only the operation.
#[allow(async_fn_in_trait)]
pub trait CrudService {
    type Dao: DaoBase;

    fn dao(&self) -> &Self::Dao;
    fn errors(&self) -> CrudErrors {
        CrudErrors::default()
    }

    fn map_error(&self, op: CrudOp, err: DaoLayerError) -> AppError {
        let errors = self.errors();
        match err {
            DaoLayerError::NotFound { .. } => AppError::not_found(errors.not_found),
            DaoLayerError::Db(err) => {
                let message = match op {
                    CrudOp::Create => errors.create_failed,
                    CrudOp::Find | CrudOp::List => errors.find_failed,
                    CrudOp::Update => errors.update_failed,
                    CrudOp::Delete => errors.delete_failed,
                };
                tracing::error!(?op, error = %err, "{message}");
                AppError::internal(message)
            }
        }
    }

    async fn list(&self) -> Result<Vec<CrudModel<Self>>, AppError> {
        self.dao()
            .find_all()
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))
    }

    async fn find_by_id(&self, id: i64) -> Result<CrudModel<Self>, AppError> {
        self.dao()
            .find_by_id(id)
            .await
            .map_err(|err| self.map_error(CrudOp::Find, err))?
            .ok_or_else(|| AppError::not_found(self.errors().not_found))
    }

    /// Inserts a new row. Any id carried by `data` is dropped so the
    /// database always assigns it.
    async fn create<T>(&self, data: T) -> Result<CrudModel<Self>, AppError>
    where
        T: IntoActiveModel<CrudActiveModel<Self>> + Send,
    {
        let mut active = data.into_active_model();
        active.clear_id();
        self.dao()
            .save(active)
            .await
            .map_err(|err| self.map_error(CrudOp::Create, err))
    }

    async fn update<F>(&self, id: i64, apply: F) -> Result<CrudModel<Self>, AppError>
    where
        F: FnOnce(&mut CrudActiveModel<Self>) + Send,
    {
        let model = self
            .dao()
            .find_by_id(id)
            .await
            .map_err(|err| self.map_error(CrudOp::Update, err))?
            .ok_or_else(|| AppError::not_found(self.errors().not_found))?;

        let mut active = model.into_active_model();
        apply(&mut active);
        self.dao()
            .save(active)
            .await
            .map_err(|err| self.map_error(CrudOp::Update, err))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let exists = self
            .dao()
            .exists_by_id(id)
            .await
            .map_err(|err| self.map_error(CrudOp::Delete, err))?;
        if !exists {
            return Err(AppError::not_found(self.errors().not_found));
        }

        self.dao()
            .delete_by_id(id)
            .await
            .map_err(|err| self.map_error(CrudOp::Delete, err))
    }
}
