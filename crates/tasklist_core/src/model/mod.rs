//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record used by repository, session and
//!   controller layers.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod task;
