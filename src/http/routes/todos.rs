use axum::{extract::State, routing::get, Router, Json};
use axum::http::StatusCode;

use crate::application::todo_service::TodoService;
use crate::domain::{error::TodoError, todo::{CreateTodo, Todo, UpdateTodo}};
use crate::http::types::{ApiError, IdPath, JsonBody, MessageBody};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route("/api/todos/:id", get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

type ApiResult<T> = Result<T, ApiError>;

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> ApiResult<Json<Vec<Todo>>> {
    Ok(Json(state.service.list().await?))
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, IdPath(id): IdPath<String>) -> ApiResult<Json<Todo>> {
    let todo = state.service.get(&id).await?.ok_or(TodoError::NotFound)?;
    Ok(Json(todo))
}

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, JsonBody(payload): JsonBody<CreateTodo>) -> ApiResult<(StatusCode, Json<Todo>)> {
    let todo = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo<S: TodoService>(State(state): State<AppState<S>>, IdPath(id): IdPath<String>, JsonBody(payload): JsonBody<UpdateTodo>) -> ApiResult<Json<Todo>> {
    let todo = state.service.update(&id, payload).await?.ok_or(TodoError::NotFound)?;
    Ok(Json(todo))
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, IdPath(id): IdPath<String>) -> ApiResult<Json<MessageBody>> {
    state.service.delete(&id).await?.ok_or(TodoError::NotFound)?;
    Ok(Json(MessageBody::new("Todo deleted successfully")))
}
