//! Persistent store session.
//!
//! # Responsibility
//! - Own the single task database connection for the process.
//! - Hold the working context of uncommitted changes and flush it on demand.
//!
//! # Invariants
//! - Exactly one owner drives a session; it is not shared across threads.

pub mod store_session;
