use async_trait::async_trait;
use super::todo::{NewTodo, Todo, TodoId};

/// Store primitives for the `todos` collection. Implementations generate ids and stamp timestamps.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn insert(&self, input: NewTodo) -> anyhow::Result<Todo>;
    async fn get(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    /// Insertion order.
    async fn list(&self) -> anyhow::Result<Vec<Todo>>;
    /// Writes the mutable fields of `todo` and refreshes `updated_at`.
    async fn update(&self, todo: Todo) -> anyhow::Result<Option<Todo>>;
    /// Returns the removed row.
    async fn delete(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
}
