//! Console adapters.
//!
//! - **confirmer** - `Confirmer` implementations for the terminal and for tests
//! - **render** - Plain-text output of listings, details and replay results

mod confirmer;
pub mod render;

pub use confirmer::{FixedConfirmer, StdinConfirmer};
