//! Repository layer for task persistence.
//!
//! # Responsibility
//! - Define the data access contract used by the store session.
//! - Isolate SQLite query details from session and controller logic.
//!
//! # Invariants
//! - Repository writes enforce `Task::validate()` before persistence.
//! - Missing rows surface as `RepoError::NotFound`, not silent no-ops.

pub mod task_repo;
