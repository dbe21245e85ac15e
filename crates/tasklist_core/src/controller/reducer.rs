//! Pure list reducer.
//!
//! # Responsibility
//! - Turn one user intent plus the current rows into the next rows, the
//!   store effect to persist, and the row change to render.
//!
//! # Invariants
//! - The reducer performs no I/O and never mutates its input.
//! - Add always appends at the end.
//! - Delete preserves the relative order of remaining rows.
//! - Empty text is ignored for both Add and Edit.

use crate::model::task::{Task, TaskId, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One user action against the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskIntent {
    /// Save from the "new task" prompt.
    Add(String),
    /// Save from the edit prompt opened on row `index`.
    Edit(usize, String),
    /// Swipe-to-delete on row `index`.
    Delete(usize),
}

/// Persistence work implied by a reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEffect {
    Insert(Task),
    Update(Task),
    Delete(TaskId),
}

/// How the rendered list should change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    /// Single-row insert animation at this index.
    Inserted(usize),
    /// Re-render every row.
    Reloaded,
    /// Single-row delete animation at this index.
    Deleted(usize),
}

/// Accepted intent: the rows after the change plus its side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub tasks: Vec<Task>,
    pub effect: StoreEffect,
    pub row_change: RowChange,
}

/// Reducer output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    /// Intent dropped (empty text); nothing changes.
    Ignored,
    Applied(Transition),
}

/// Intent rejected before any state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReduceError {
    IndexOutOfRange { index: usize, len: usize },
    Validation(TaskValidationError),
}

impl Display for ReduceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "row index {index} is out of range for {len} task(s)")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReduceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<TaskValidationError> for ReduceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Computes the next list state for `intent`.
///
/// # Errors
/// - `IndexOutOfRange` for Edit/Delete on a row that does not exist.
pub fn reduce(tasks: &[Task], intent: &TaskIntent) -> Result<Reduction, ReduceError> {
    match intent {
        TaskIntent::Add(text) => {
            if text.is_empty() {
                return Ok(Reduction::Ignored);
            }
            let task = Task::new(text.as_str())?;
            let mut next = tasks.to_vec();
            next.push(task.clone());
            let row = next.len() - 1;
            Ok(Reduction::Applied(Transition {
                tasks: next,
                effect: StoreEffect::Insert(task),
                row_change: RowChange::Inserted(row),
            }))
        }
        TaskIntent::Edit(index, text) => {
            check_index(*index, tasks.len())?;
            if text.is_empty() {
                return Ok(Reduction::Ignored);
            }
            let mut next = tasks.to_vec();
            next[*index].rename(text.as_str());
            let updated = next[*index].clone();
            Ok(Reduction::Applied(Transition {
                tasks: next,
                effect: StoreEffect::Update(updated),
                row_change: RowChange::Reloaded,
            }))
        }
        TaskIntent::Delete(index) => {
            check_index(*index, tasks.len())?;
            let mut next = tasks.to_vec();
            let removed = next.remove(*index);
            Ok(Reduction::Applied(Transition {
                tasks: next,
                effect: StoreEffect::Delete(removed.uuid),
                row_change: RowChange::Deleted(*index),
            }))
        }
    }
}

fn check_index(index: usize, len: usize) -> Result<(), ReduceError> {
    if index >= len {
        return Err(ReduceError::IndexOutOfRange { index, len });
    }
    Ok(())
}
