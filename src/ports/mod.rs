//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `LocalStore` - Client-side keyed storage (membership record, admin session)
//! - `CodeRegistry` - Remote access-code service
//! - `Confirmer` - Operator confirmation for destructive actions

mod code_registry;
mod confirmer;
mod local_store;

pub use code_registry::{CodeRegistry, RegistryError};
pub use confirmer::Confirmer;
pub use local_store::{keys, LocalStore, StoreError};
