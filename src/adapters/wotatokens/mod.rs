//! wotatokens code service adapters.
//!
//! - **HttpCodeRegistry** - `reqwest` client for the remote REST API
//! - **InMemoryCodeRegistry** - In-process registry for tests and development

mod http_registry;
mod in_memory_registry;
mod wire;

pub use http_registry::{HttpCodeRegistry, WotatokensConfig, DEFAULT_BASE_URL};
pub use in_memory_registry::{InMemoryCodeRegistry, RegistryCall};
