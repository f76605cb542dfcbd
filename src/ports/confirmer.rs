//! Confirmation port.
//!
//! Destructive console actions ask the operator before anything is sent.

use async_trait::async_trait;

/// Port for asking the operator a yes/no question.
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Returns true only if the operator explicitly agreed.
    async fn confirm(&self, prompt: &str) -> bool;
}
