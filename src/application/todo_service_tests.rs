use super::todo_service::{TodoService, TodoServiceImpl};
use crate::domain::{error::TodoError, repository::TodoRepository, todo::{CreateTodo, NewTodo, Todo, TodoId, UpdateTodo}};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct InMemoryRepo {
    items: Arc<Mutex<Vec<Todo>>>,
    broken: bool,
}

impl InMemoryRepo {
    fn broken() -> Self { Self { broken: true, ..Default::default() } }
    fn check(&self) -> Result<()> {
        if self.broken { anyhow::bail!("store unreachable") }
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for InMemoryRepo {
    async fn init(&self) -> Result<()> { self.check() }
    async fn insert(&self, input: NewTodo) -> Result<Todo> {
        self.check()?;
        let now = Utc::now();
        let todo = Todo { id: TodoId::generate(), title: input.title, description: input.description, is_completed: input.is_completed, created_at: now, updated_at: now };
        self.items.lock().unwrap().push(todo.clone());
        Ok(todo)
    }
    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        self.check()?;
        Ok(self.items.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }
    async fn list(&self) -> Result<Vec<Todo>> {
        self.check()?;
        Ok(self.items.lock().unwrap().clone())
    }
    async fn update(&self, mut todo: Todo) -> Result<Option<Todo>> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let Some(slot) = items.iter_mut().find(|t| t.id == todo.id) else { return Ok(None) };
        todo.updated_at = Utc::now();
        *slot = todo.clone();
        Ok(Some(todo))
    }
    async fn delete(&self, id: TodoId) -> Result<Option<Todo>> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let pos = items.iter().position(|t| t.id == id);
        Ok(pos.map(|i| items.remove(i)))
    }
}

fn create(title: &str) -> CreateTodo {
    CreateTodo { title: Some(title.into()), ..Default::default() }
}

#[tokio::test]
async fn unit_create_and_get() {
    let service = TodoServiceImpl::new(InMemoryRepo::default());
    let created = service.create(create("Buy milk")).await.unwrap();
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description, "");
    assert!(!created.is_completed);
    let got = service.get(&created.id.to_string()).await.unwrap().unwrap();
    assert_eq!(got, created);
}

#[tokio::test]
async fn blank_title_persists_nothing() {
    let repo = InMemoryRepo::default();
    let service = TodoServiceImpl::new(repo.clone());
    let err = service.create(create("   ")).await.unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)));
    let err = service.create(CreateTodo::default()).await.unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)));
    assert!(repo.items.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_ids_are_rejected_before_the_store() {
    let service = TodoServiceImpl::new(InMemoryRepo::broken());
    assert!(matches!(service.get("abc").await, Err(TodoError::InvalidIdentifier(_))));
    assert!(matches!(service.update("abc", UpdateTodo::default()).await, Err(TodoError::InvalidIdentifier(_))));
    assert!(matches!(service.delete("abc").await, Err(TodoError::InvalidIdentifier(_))));
}

#[tokio::test]
async fn unknown_id_is_none_not_error() {
    let service = TodoServiceImpl::new(InMemoryRepo::default());
    let id = TodoId::generate().to_string();
    assert!(service.get(&id).await.unwrap().is_none());
    assert!(service.update(&id, UpdateTodo { is_completed: Some(true), ..Default::default() }).await.unwrap().is_none());
    assert!(service.delete(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_merges_and_advances_updated_at() {
    let service = TodoServiceImpl::new(InMemoryRepo::default());
    let created = service.create(CreateTodo { title: Some("Walk dog".into()), description: Some("park".into()), is_completed: None }).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let updated = service
        .update(&created.id.to_string(), UpdateTodo { is_completed: Some(true), ..Default::default() })
        .await
        .unwrap()
        .unwrap();
    assert!(updated.is_completed);
    assert_eq!(updated.title, "Walk dog");
    assert_eq!(updated.description, "park");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn update_with_blank_title_leaves_record_untouched() {
    let service = TodoServiceImpl::new(InMemoryRepo::default());
    let created = service.create(create("Keep me")).await.unwrap();
    let id = created.id.to_string();
    let err = service.update(&id, UpdateTodo { title: Some(" ".into()), ..Default::default() }).await.unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)));
    assert_eq!(service.get(&id).await.unwrap().unwrap(), created);
}

#[tokio::test]
async fn delete_returns_prior_state_then_forgets() {
    let service = TodoServiceImpl::new(InMemoryRepo::default());
    let created = service.create(create("Temp")).await.unwrap();
    let id = created.id.to_string();
    assert_eq!(service.delete(&id).await.unwrap(), Some(created));
    assert!(service.get(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_returns_everything_created() {
    let service = TodoServiceImpl::new(InMemoryRepo::default());
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(service.create(create(&format!("todo {i}"))).await.unwrap().id);
    }
    let listed: Vec<TodoId> = service.list().await.unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn store_failures_surface_with_their_message() {
    let service = TodoServiceImpl::new(InMemoryRepo::broken());
    let err = service.list().await.unwrap_err();
    assert!(matches!(err, TodoError::Store(_)));
    assert_eq!(err.to_string(), "store unreachable");
}
