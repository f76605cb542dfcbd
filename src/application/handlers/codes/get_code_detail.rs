//! GetCodeDetailHandler - Query handler for one code and its usage history.

use std::sync::Arc;

use crate::domain::access_code::CodeDetail;
use crate::ports::{CodeRegistry, RegistryError};

use super::{require_code_and_email, AdminOperation, CodeAdminError};

/// Query for a single code. The email must be the code's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCodeDetailQuery {
    pub code: String,
    pub email: String,
}

/// Handler for fetching code details.
pub struct GetCodeDetailHandler {
    registry: Arc<dyn CodeRegistry>,
}

impl GetCodeDetailHandler {
    pub fn new(registry: Arc<dyn CodeRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: GetCodeDetailQuery) -> Result<CodeDetail, CodeAdminError> {
        let (code, email) = require_code_and_email(&query.code, &query.email)?;

        self.registry
            .detail(code, email)
            .await
            .map_err(|e| match e {
                RegistryError::Rejected { .. } => CodeAdminError::NotFound {
                    code: code.to_string(),
                },
                other => CodeAdminError::from_registry(AdminOperation::Detail, other),
            })
    }
}
