use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::{db::entities::todo, error::AppError, services::ServiceContext, state::AppState};

const BASE_PATH: &str = "/todos";

/// Wire shape accepted by create and update. `id` is read so that a
/// client-supplied value can be recognised and discarded, never stored.
/// A missing or null `description` is stored as the empty string.
#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    pub id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub description: String,
    pub completed: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(BASE_PATH, get(list_todos).post(create_todo))
        .route(&format!("{BASE_PATH}/"), get(list_todos).post(create_todo))
        .route(
            &format!("{BASE_PATH}/{{id}}"),
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = ServiceContext::from_state(&state).todo().list_todos().await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = ServiceContext::from_state(&state).todo().get_todo(id).await?;
    Ok(Json(todo.into()))
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    if let Some(requested) = body.id {
        tracing::debug!(requested, "ignoring client-supplied todo id");
    }
    let todo = ServiceContext::from_state(&state)
        .todo()
        .create_todo(body)
        .await?;
    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo.into())))
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<TodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    let TodoRequest {
        description,
        completed,
        ..
    } = body;
    let todo = ServiceContext::from_state(&state)
        .todo()
        .update_todo(id, description.unwrap_or_default(), completed)
        .await?;
    Ok(Json(todo.into()))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    ServiceContext::from_state(&state)
        .todo()
        .delete_todo(id)
        .await?;
    tracing::info!(id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

impl IntoActiveModel<todo::ActiveModel> for TodoRequest {
    fn into_active_model(self) -> todo::ActiveModel {
        todo::ActiveModel {
            description: Set(self.description.unwrap_or_default()),
            completed: Set(self.completed),
            ..Default::default()
        }
    }
}

impl From<todo::Model> for TodoResponse {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            completed: model.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveValue, IntoActiveModel};

    use super::{TodoRequest, TodoResponse};
    use crate::db::entities::todo;

    #[test]
    fn request_defaults_missing_fields() {
        let request: TodoRequest =
            serde_json::from_str(r#"{"description":"buy milk"}"#).expect("request should parse");

        assert_eq!(request.id, None);
        assert_eq!(request.description.as_deref(), Some("buy milk"));
        assert!(!request.completed);
    }

    #[test]
    fn null_description_becomes_empty_string() {
        let request: TodoRequest = serde_json::from_str(r#"{"description":null,"completed":true}"#)
            .expect("request should parse");

        let active = request.into_active_model();

        assert_eq!(active.description, ActiveValue::Set(String::new()));
        assert_eq!(active.completed, ActiveValue::Set(true));
    }

    #[test]
    fn request_maps_fields_but_never_the_id() {
        let request = TodoRequest {
            id: Some(12),
            description: Some("walk dog".to_string()),
            completed: true,
        };

        let active = request.into_active_model();

        assert_eq!(active.id, ActiveValue::NotSet);
        assert_eq!(active.description, ActiveValue::Set("walk dog".to_string()));
        assert_eq!(active.completed, ActiveValue::Set(true));
    }

    #[test]
    fn response_serialises_three_fields() {
        let response = TodoResponse::from(todo::Model {
            id: 1,
            description: "buy milk".to_string(),
            completed: false,
        });

        assert_eq!(
            serde_json::to_value(&response).expect("response should serialise"),
            serde_json::json!({ "id": 1, "description": "buy milk", "completed": false })
        );
    }
}
