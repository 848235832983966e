use std::{str::FromStr, sync::Arc};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    repository::TodoRepository,
    todo::{NewTodo, Todo, TodoId},
};

const COLUMNS: &str = "id, title, description, is_completed, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url `{database_url}`"))?
            .create_if_missing(true);
        if !is_in_memory(database_url) { ensure_parent_dir(database_url)?; }

        // An in-memory database lives only while a connection holds it open, so keep exactly one alive.
        let pool = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        }
        .connect_with(options)
        .await?;
        tracing::debug!(database_url, "store connected");
        Ok(Self { pool: Arc::new(pool) })
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn ensure_parent_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://").or_else(|| database_url.strip_prefix("sqlite:")) else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or(rest);
    // On Windows, absolute paths may look like /C:/path; strip the leading slash
    let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
        &path[1..]
    } else {
        path
    };
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| format!("cannot create {}", parent.display()))?;
        }
    }
    Ok(())
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL CHECK (length(trim(title)) > 0),
                description TEXT NOT NULL DEFAULT '',
                is_completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn insert(&self, input: NewTodo) -> Result<Todo> {
        let now = Utc::now();
        let todo = Todo {
            id: TodoId::generate(),
            title: input.title,
            description: input.description,
            is_completed: input.is_completed,
            created_at: now,
            updated_at: now,
        };
        sqlx::query(
            "INSERT INTO todos (id, title, description, is_completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(todo.id.to_string())
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.is_completed)
        .bind(todo.created_at.to_rfc3339())
        .bind(todo.updated_at.to_rfc3339())
        .execute(&*self.pool)
        .await?;
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM todos WHERE id = ?1"))
            .bind(id.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_todo).transpose()
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM todos ORDER BY rowid ASC"))
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(row_to_todo).collect()
    }

    async fn update(&self, todo: Todo) -> Result<Option<Todo>> {
        let row = sqlx::query(&format!(
            "UPDATE todos SET title = ?2, description = ?3, is_completed = ?4, updated_at = ?5
             WHERE id = ?1 RETURNING {COLUMNS}"
        ))
        .bind(todo.id.to_string())
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.is_completed)
        .bind(Utc::now().to_rfc3339())
        .fetch_optional(&*self.pool)
        .await?;
        row.map(row_to_todo).transpose()
    }

    async fn delete(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query(&format!("DELETE FROM todos WHERE id = ?1 RETURNING {COLUMNS}"))
            .bind(id.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_todo).transpose()
    }
}

fn row_to_todo(row: SqliteRow) -> Result<Todo> {
    let id_str: String = row.try_get("id")?;
    let created_at_str: String = row.try_get("created_at")?;
    let updated_at_str: String = row.try_get("updated_at")?;

    let id = TodoId::parse(&id_str).with_context(|| format!("corrupt todo id `{id_str}`"))?;
    Ok(Todo {
        id,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        is_completed: row.try_get("is_completed")?,
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("corrupt timestamp `{raw}`"))?
        .with_timezone(&Utc))
}
