//! List controller: intents, reducer and the stateful screen controller.
//!
//! # Responsibility
//! - Keep list transitions pure (`reducer`).
//! - Sequence reducer output with persistence (`task_list`).

pub mod reducer;
pub mod task_list;
