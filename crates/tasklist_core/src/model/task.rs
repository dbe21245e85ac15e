//! Task domain model.
//!
//! # Responsibility
//! - Define the single titled to-do record shown as one list row.
//! - Own creation-time validation of titles and identities.
//!
//! # Invariants
//! - `uuid` is stable, non-nil and never reused for another task.
//! - `title` is always present; emptiness is rejected only at creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Store-level identity of a task. Never shown to the user.
pub type TaskId = Uuid;

/// Validation failures for task construction and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Nil UUID cannot identify a stored task.
    NilUuid,
    /// New tasks must carry a non-empty title.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "task uuid must not be nil"),
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One titled to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskWire")]
pub struct Task {
    /// Stable ID used as the store's object identity.
    pub uuid: TaskId,
    /// Row text.
    pub title: String,
}

#[derive(Deserialize)]
struct TaskWire {
    uuid: TaskId,
    title: String,
}

impl TryFrom<TaskWire> for Task {
    type Error = TaskValidationError;

    fn try_from(value: TaskWire) -> Result<Self, Self::Error> {
        let task = Self {
            uuid: value.uuid,
            title: value.title,
        };
        task.validate()?;
        Ok(task)
    }
}

impl Task {
    /// Creates a new task with a generated stable ID.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is empty.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a new task with a caller-provided ID.
    ///
    /// # Errors
    /// - `NilUuid` when `uuid` is nil.
    /// - `EmptyTitle` when `title` is empty.
    pub fn with_id(uuid: TaskId, title: impl Into<String>) -> Result<Self, TaskValidationError> {
        let title = title.into();
        if title.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        let task = Self { uuid, title };
        task.validate()?;
        Ok(task)
    }

    /// Replaces the title in place.
    ///
    /// Does not re-check emptiness; callers filter empty input upstream.
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Checks invariants that must hold for every persisted task.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.uuid.is_nil() {
            return Err(TaskValidationError::NilUuid);
        }
        Ok(())
    }
}
