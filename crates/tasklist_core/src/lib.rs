//! Core logic for the task list.
//! Owns the task model, its SQLite store and the list controller.

pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod session;
pub mod view;

pub use config::AppConfig;
pub use controller::reducer::{reduce, ReduceError, Reduction, RowChange, StoreEffect, TaskIntent};
pub use controller::task_list::{ControllerError, DispatchOutcome, TaskListController};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use session::store_session::{
    CommitOutcome, PendingChange, SessionError, SessionResult, StoreSession, StoreTarget,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
