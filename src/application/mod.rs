//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//!
//! `AdminConsole` sits on top of the code handlers and keeps the console's
//! display state.

pub mod admin_console;
pub mod handlers;

pub use admin_console::{AdminConsole, ConsoleState, Notice, NoticeKind};
