//! Todos module - the in-memory todo list and its add dialog
//!
//! This module provides:
//! - Item and dialog state types
//! - The controller that applies every user transition
//! - Change notification for the rendering layer

pub mod controller;
pub mod data;

// Re-export commonly used types
pub use controller::TodoListController;
pub use data::TodoError;
