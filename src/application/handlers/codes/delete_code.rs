//! DeleteCodeHandler - Command handler for deleting a code after confirmation.

use std::sync::Arc;

use crate::ports::{CodeRegistry, Confirmer};

use super::{require_code_and_email, AdminOperation, CodeAdminError};

/// Command to delete a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCodeCommand {
    pub code: String,
    pub email: String,
}

/// What happened to a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { code: String },
    /// The operator declined; nothing was sent.
    Cancelled,
}

/// Handler for deleting codes.
pub struct DeleteCodeHandler {
    registry: Arc<dyn CodeRegistry>,
    confirmer: Arc<dyn Confirmer>,
}

impl DeleteCodeHandler {
    pub fn new(registry: Arc<dyn CodeRegistry>, confirmer: Arc<dyn Confirmer>) -> Self {
        Self {
            registry,
            confirmer,
        }
    }

    pub async fn handle(&self, cmd: DeleteCodeCommand) -> Result<DeleteOutcome, CodeAdminError> {
        let (code, email) = require_code_and_email(&cmd.code, &cmd.email)?;

        let prompt = format!("Apakah Anda yakin ingin menghapus code: {}?", code);
        if !self.confirmer.confirm(&prompt).await {
            tracing::debug!(code = %code, "Delete cancelled by operator");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.registry
            .delete(code, email)
            .await
            .map_err(|e| CodeAdminError::from_registry(AdminOperation::Delete, e))?;

        Ok(DeleteOutcome::Deleted {
            code: code.to_string(),
        })
    }
}
