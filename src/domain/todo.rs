use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValidationError;

const TITLE_REQUIRED: &str = "Title is required";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub fn generate() -> Self { Self(Uuid::new_v4()) }

    /// `None` when `raw` is not a UUID in any of its textual forms.
    pub fn parse(raw: &str) -> Option<Self> { Uuid::try_parse(raw).ok().map(Self) }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

/// A create payload that passed validation, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

pub fn validate_new(input: CreateTodo) -> Result<NewTodo, ValidationError> {
    let title = validate_title(input.title.as_deref())?;
    Ok(NewTodo {
        title,
        description: input.description.unwrap_or_default(),
        is_completed: input.is_completed.unwrap_or(false),
    })
}

fn validate_title(raw: Option<&str>) -> Result<String, ValidationError> {
    match raw.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_owned()),
        _ => Err(ValidationError::new("title", TITLE_REQUIRED)),
    }
}

impl Todo {
    /// Applies the supplied fields onto a copy of this record and re-validates it.
    /// `updated_at` is left alone; the store stamps it on write.
    pub fn merged(&self, patch: UpdateTodo) -> Result<Todo, ValidationError> {
        let mut next = self.clone();
        if let Some(t) = patch.title { next.title = t; }
        if let Some(d) = patch.description { next.description = d; }
        if let Some(c) = patch.is_completed { next.is_completed = c; }
        next.title = validate_title(Some(&next.title))?;
        Ok(next)
    }
}
