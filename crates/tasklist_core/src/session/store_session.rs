//! Store session: one lazily-opened database plus one working context.
//!
//! # Responsibility
//! - Open the task database on first access, not at construction.
//! - Stage inserts, updates and deletes in memory until `commit`.
//! - Flush all staged changes in a single SQLite transaction.
//!
//! # Invariants
//! - `commit` with nothing staged never touches the database.
//! - A failed commit leaves the database at its last saved state and
//!   discards the staged changes; nothing is retried.
//! - `fetch_all` reflects staged changes on top of saved rows.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
use log::{debug, error, info};
use rusqlite::{Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

pub type SessionResult<T> = Result<T, SessionError>;

/// Where the session keeps its tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    File(PathBuf),
    /// Private database that disappears with the session. Used by tests.
    InMemory,
}

/// Errors from store session operations.
#[derive(Debug)]
pub enum SessionError {
    /// Database could not be opened or migrated.
    Open(DbError),
    /// Query or write failed against an open database.
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open task store: {err}"),
            Self::Repo(err) => write!(f, "task store operation failed: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<DbError> for SessionError {
    fn from(value: DbError) -> Self {
        Self::Open(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for SessionError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

/// One staged mutation awaiting commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    Insert(Task),
    Update(Task),
    Delete(TaskId),
}

/// Result of a successful `commit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing was staged.
    Clean,
    /// Staged changes were written.
    Saved { changes: usize },
}

/// Owns the task database connection and its working context.
pub struct StoreSession {
    target: StoreTarget,
    conn: Option<Connection>,
    pending: Vec<PendingChange>,
}

impl StoreSession {
    /// Creates a session without opening the database.
    pub fn new(target: StoreTarget) -> Self {
        Self {
            target,
            conn: None,
            pending: Vec::new(),
        }
    }

    /// Whether the database has been opened yet.
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Returns the open connection, opening it on first call.
    ///
    /// A failed open is not cached; the next access tries again.
    pub fn connection(&mut self) -> SessionResult<&Connection> {
        self.connection_mut().map(|conn| &*conn)
    }

    /// Whether the working context holds uncommitted changes.
    pub fn has_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_changes(&self) -> &[PendingChange] {
        &self.pending
    }

    /// Stages a new task.
    pub fn insert(&mut self, task: Task) {
        self.pending.push(PendingChange::Insert(task));
    }

    /// Stages a title change for an existing task.
    pub fn update(&mut self, task: Task) {
        self.pending.push(PendingChange::Update(task));
    }

    /// Stages removal of a task.
    pub fn delete(&mut self, id: TaskId) {
        self.pending.push(PendingChange::Delete(id));
    }

    /// Lists saved tasks with staged changes applied, in display order.
    pub fn fetch_all(&mut self) -> SessionResult<Vec<Task>> {
        let started_at = Instant::now();
        let saved = {
            let conn = self.connection_mut()?;
            SqliteTaskRepository::try_new(conn)?.list_tasks()?
        };
        let tasks = overlay_pending(saved, &self.pending);
        debug!(
            "event=store_fetch module=session status=ok count={} pending={} duration_ms={}",
            tasks.len(),
            self.pending.len(),
            started_at.elapsed().as_millis()
        );
        Ok(tasks)
    }

    /// Writes all staged changes if there are any.
    ///
    /// # Errors
    /// Any failure rolls the transaction back and discards the staged
    /// changes, so the working context matches the database again.
    pub fn commit(&mut self) -> SessionResult<CommitOutcome> {
        if self.pending.is_empty() {
            debug!("event=store_commit module=session status=ok result=clean");
            return Ok(CommitOutcome::Clean);
        }

        let started_at = Instant::now();
        let changes = std::mem::take(&mut self.pending);
        let result = self
            .connection_mut()
            .and_then(|conn| apply_changes(conn, &changes).map_err(SessionError::from));

        match result {
            Ok(()) => {
                info!(
                    "event=store_commit module=session status=ok changes={} duration_ms={}",
                    changes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(CommitOutcome::Saved {
                    changes: changes.len(),
                })
            }
            Err(err) => {
                error!(
                    "event=store_commit module=session status=error changes_discarded={} duration_ms={} error={}",
                    changes.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Drops staged changes without writing them.
    pub fn rollback(&mut self) {
        if !self.pending.is_empty() {
            info!(
                "event=store_rollback module=session status=ok changes_discarded={}",
                self.pending.len()
            );
        }
        self.pending.clear();
    }

    fn connection_mut(&mut self) -> SessionResult<&mut Connection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => match &self.target {
                StoreTarget::File(path) => open_db(path)?,
                StoreTarget::InMemory => open_db_in_memory()?,
            },
        };
        Ok(self.conn.insert(conn))
    }
}

fn apply_changes(conn: &mut Connection, changes: &[PendingChange]) -> RepoResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    {
        let repo = SqliteTaskRepository::try_new(&tx)?;
        for change in changes {
            match change {
                PendingChange::Insert(task) => {
                    repo.insert_task(task)?;
                }
                PendingChange::Update(task) => repo.update_task(task)?,
                PendingChange::Delete(id) => repo.delete_task(*id)?,
            }
        }
    }
    tx.commit()?;
    Ok(())
}

fn overlay_pending(mut tasks: Vec<Task>, pending: &[PendingChange]) -> Vec<Task> {
    for change in pending {
        match change {
            PendingChange::Insert(task) => tasks.push(task.clone()),
            PendingChange::Update(task) => {
                if let Some(current) = tasks.iter_mut().find(|item| item.uuid == task.uuid) {
                    current.title = task.title.clone();
                }
            }
            PendingChange::Delete(id) => tasks.retain(|item| item.uuid != *id),
        }
    }
    tasks
}
