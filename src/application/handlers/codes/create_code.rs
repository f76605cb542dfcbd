//! CreateCodeHandler - Command handler for issuing a new access code.

use std::sync::Arc;

use crate::domain::access_code::{AccessCode, CodeDraft};
use crate::domain::foundation::Timestamp;
use crate::ports::CodeRegistry;

use super::{AdminOperation, CodeAdminError};

/// Command to create an access code.
#[derive(Debug, Clone)]
pub struct CreateCodeCommand {
    pub draft: CodeDraft,
    /// Stamped into the metadata as `created_at`.
    pub now: Timestamp,
}

/// Result of successful code creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCodeResult {
    pub code: AccessCode,
    /// True when the code was deactivated right after creation.
    pub deactivated: bool,
}

/// Handler for creating access codes.
///
/// The service always creates codes active. When the draft asks for an
/// inactive code, a second call deactivates it with the same metadata.
pub struct CreateCodeHandler {
    registry: Arc<dyn CodeRegistry>,
}

impl CreateCodeHandler {
    pub fn new(registry: Arc<dyn CodeRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: CreateCodeCommand) -> Result<CreateCodeResult, CodeAdminError> {
        let request = cmd.draft.validate(cmd.now)?;

        let mut code = self
            .registry
            .create(&request)
            .await
            .map_err(|e| CodeAdminError::from_registry(AdminOperation::Create, e))?;

        if request.activate {
            return Ok(CreateCodeResult {
                code,
                deactivated: false,
            });
        }

        self.registry
            .set_active(&code.code, &request.email, false, Some(&request.metadata))
            .await
            .map_err(|source| {
                tracing::warn!(code = %code.code, error = %source, "Follow-up deactivation failed");
                CodeAdminError::DeactivationFailed {
                    code: code.code.clone(),
                    source,
                }
            })?;
        code.is_active = false;

        Ok(CreateCodeResult {
            code,
            deactivated: true,
        })
    }
}
