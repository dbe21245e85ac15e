//! Task list controller.
//!
//! # Responsibility
//! - Hold the ordered in-memory list the screen renders.
//! - Apply reducer output to the store session and commit synchronously.
//!
//! # Invariants
//! - The in-memory list only advances after its commit succeeded, so it
//!   never drifts from what is on disk.
//! - Store failures are logged and reported as `RolledBack`, never retried.

use super::reducer::{reduce, ReduceError, Reduction, RowChange, StoreEffect, TaskIntent};
use crate::model::task::Task;
use crate::session::store_session::{SessionError, StoreSession};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors surfaced to the caller of `dispatch`.
#[derive(Debug)]
pub enum ControllerError {
    /// Edit/Delete targeted a row that does not exist.
    IndexOutOfRange { index: usize, len: usize },
    /// Intent produced an invalid task.
    Invalid(ReduceError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "row index {index} is out of range for {len} task(s)")
            }
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<ReduceError> for ControllerError {
    fn from(value: ReduceError) -> Self {
        match value {
            ReduceError::IndexOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
            other => Self::Invalid(other),
        }
    }
}

/// What happened to one dispatched intent.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// List changed and was saved; render this row change.
    Applied(RowChange),
    /// Intent carried empty text; nothing changed.
    Ignored,
    /// Save failed; list and store are both left as they were.
    RolledBack(SessionError),
}

impl DispatchOutcome {
    pub fn row_change(&self) -> Option<RowChange> {
        match self {
            Self::Applied(change) => Some(*change),
            Self::Ignored | Self::RolledBack(_) => None,
        }
    }
}

/// Screen-level state machine over one ordered task list.
pub struct TaskListController {
    session: StoreSession,
    tasks: Vec<Task>,
}

impl TaskListController {
    /// Builds the controller and fetches every saved task.
    ///
    /// A failed fetch is logged and the list starts empty.
    pub fn load(mut session: StoreSession) -> Self {
        let tasks = match session.fetch_all() {
            Ok(tasks) => {
                info!(
                    "event=task_list_load module=controller status=ok count={}",
                    tasks.len()
                );
                tasks
            }
            Err(err) => {
                error!(
                    "event=task_list_load module=controller status=error error_code=fetch_failed error={}",
                    err
                );
                Vec::new()
            }
        };
        Self { session, tasks }
    }

    /// Applies one intent: reduce, stage, commit, then publish.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when Edit/Delete names a missing row.
    ///
    /// Store failures are not errors here; they come back as
    /// `DispatchOutcome::RolledBack`.
    pub fn dispatch(&mut self, intent: TaskIntent) -> Result<DispatchOutcome, ControllerError> {
        let action = intent_name(&intent);
        let transition = match reduce(&self.tasks, &intent)? {
            Reduction::Ignored => {
                info!("event=task_{action} module=controller status=ignored reason=empty_text");
                return Ok(DispatchOutcome::Ignored);
            }
            Reduction::Applied(transition) => transition,
        };

        match transition.effect {
            StoreEffect::Insert(task) => self.session.insert(task),
            StoreEffect::Update(task) => self.session.update(task),
            StoreEffect::Delete(id) => self.session.delete(id),
        }

        if let Err(err) = self.session.commit() {
            warn!(
                "event=task_{action} module=controller status=rolled_back error={}",
                err
            );
            return Ok(DispatchOutcome::RolledBack(err));
        }

        self.tasks = transition.tasks;
        info!(
            "event=task_{action} module=controller status=ok count={}",
            self.tasks.len()
        );
        Ok(DispatchOutcome::Applied(transition.row_change))
    }

    /// Re-reads the list from the store, replacing the in-memory copy.
    pub fn reload(&mut self) -> Result<(), SessionError> {
        self.tasks = self.session.fetch_all()?;
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Row texts in display order.
    pub fn titles(&self) -> Vec<&str> {
        self.tasks.iter().map(|task| task.title.as_str()).collect()
    }

    pub fn title_at(&self, index: usize) -> Option<&str> {
        self.tasks.get(index).map(|task| task.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn session_mut(&mut self) -> &mut StoreSession {
        &mut self.session
    }
}

fn intent_name(intent: &TaskIntent) -> &'static str {
    match intent {
        TaskIntent::Add(_) => "add",
        TaskIntent::Edit(..) => "edit",
        TaskIntent::Delete(_) => "delete",
    }
}
