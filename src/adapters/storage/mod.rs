//! Storage Adapters
//!
//! Implementations of the LocalStore port.
//!
//! ## Available Adapters
//!
//! - **FileLocalStore** - One file per key in a directory on disk
//! - **InMemoryLocalStore** - Stores values in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileLocalStore, InMemoryLocalStore};
//!
//! // CLI: survives between invocations
//! let store = FileLocalStore::new("./.wotatoken");
//!
//! // Testing: in-memory store
//! let store = InMemoryLocalStore::new();
//! ```

mod file_local_store;
mod in_memory_local_store;

pub use file_local_store::FileLocalStore;
pub use in_memory_local_store::InMemoryLocalStore;
