//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - `LocalStore` implementations (in-memory, file-backed)
//! - `wotatokens` - `CodeRegistry` over the wotatokens REST API, plus an in-memory registry
//! - `console` - Terminal confirmation and output rendering

pub mod console;
pub mod storage;
pub mod wotatokens;

pub use console::{FixedConfirmer, StdinConfirmer};
pub use storage::{FileLocalStore, InMemoryLocalStore};
pub use wotatokens::{HttpCodeRegistry, InMemoryCodeRegistry};
