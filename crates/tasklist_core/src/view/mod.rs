//! Terminal presentation adapter.
//!
//! # Responsibility
//! - Map typed lines to screen gestures and prompt answers.
//! - Render the list, prompts and row-change notices as plain text.
//!
//! # Invariants
//! - Nothing here touches the store; the front-end feeds intents to the
//!   controller.

pub mod command;
pub mod render;
