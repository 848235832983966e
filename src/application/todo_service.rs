use crate::domain::error::TodoError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{validate_new, CreateTodo, Todo, TodoId, UpdateTodo};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, TodoError>;

/// CRUD over the todo collection. Ids arrive as raw text and are checked here;
/// a well-formed id with no record yields `Ok(None)`.
#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Todo>>;
    async fn get(&self, id: &str) -> Result<Option<Todo>>;
    async fn create(&self, input: CreateTodo) -> Result<Todo>;
    async fn update(&self, id: &str, input: UpdateTodo) -> Result<Option<Todo>>;
    async fn delete(&self, id: &str) -> Result<Option<Todo>>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

fn parse_id(raw: &str) -> Result<TodoId> {
    TodoId::parse(raw).ok_or_else(|| TodoError::InvalidIdentifier(raw.to_owned()))
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn list(&self) -> Result<Vec<Todo>> { Ok(self.repo.list().await?) }

    async fn get(&self, id: &str) -> Result<Option<Todo>> {
        let id = parse_id(id)?;
        Ok(self.repo.get(id).await?)
    }

    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let new = validate_new(input)?;
        let todo = self.repo.insert(new).await?;
        tracing::debug!(id = %todo.id, "todo created");
        Ok(todo)
    }

    async fn update(&self, id: &str, input: UpdateTodo) -> Result<Option<Todo>> {
        let id = parse_id(id)?;
        let Some(existing) = self.repo.get(id).await? else { return Ok(None) };
        let merged = existing.merged(input)?;
        let updated = self.repo.update(merged).await?;
        tracing::debug!(%id, found = updated.is_some(), "todo updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<Option<Todo>> {
        let id = parse_id(id)?;
        let removed = self.repo.delete(id).await?;
        tracing::debug!(%id, found = removed.is_some(), "todo deleted");
        Ok(removed)
    }
}
