//! UpdateCodeStatusHandler - Command handler for activating or deactivating a code.

use std::sync::Arc;

use crate::ports::CodeRegistry;

use super::{require_code_and_email, AdminOperation, CodeAdminError};

/// Command to set a code's active flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCodeStatusCommand {
    pub code: String,
    pub email: String,
    pub is_active: bool,
}

/// Result of a successful status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCodeStatusResult {
    pub code: String,
    pub is_active: bool,
}

/// Handler for toggling the active flag.
pub struct UpdateCodeStatusHandler {
    registry: Arc<dyn CodeRegistry>,
}

impl UpdateCodeStatusHandler {
    pub fn new(registry: Arc<dyn CodeRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCodeStatusCommand,
    ) -> Result<UpdateCodeStatusResult, CodeAdminError> {
        let (code, email) = require_code_and_email(&cmd.code, &cmd.email)?;

        self.registry
            .set_active(code, email, cmd.is_active, None)
            .await
            .map_err(|e| CodeAdminError::from_registry(AdminOperation::Update, e))?;

        Ok(UpdateCodeStatusResult {
            code: code.to_string(),
            is_active: cmd.is_active,
        })
    }
}
