//! Access code handlers.
//!
//! Command and query handlers for the admin console. Every handler makes
//! at most one attempt per call; nothing is retried or cached.
//!
//! ## Commands
//! - Creating codes (with optional immediate deactivation)
//! - Activating and deactivating codes
//! - Deleting codes after operator confirmation
//!
//! ## Queries
//! - Filtered, searchable, paginated listing with statistics
//! - Code detail with usage history

mod create_code;
mod delete_code;
mod errors;
mod get_code_detail;
mod list_codes;
mod update_code_status;

use crate::domain::foundation::ValidationError;

pub use errors::{AdminOperation, CodeAdminError};

// Commands
pub use create_code::{CreateCodeCommand, CreateCodeHandler, CreateCodeResult};
pub use delete_code::{DeleteCodeCommand, DeleteCodeHandler, DeleteOutcome};
pub use update_code_status::{
    UpdateCodeStatusCommand, UpdateCodeStatusHandler, UpdateCodeStatusResult,
};

// Queries
pub use get_code_detail::{GetCodeDetailHandler, GetCodeDetailQuery};
pub use list_codes::{CodeListing, ListCodesHandler, ListCodesQuery};

/// Trims the `(code, email)` pair and requires both to be non-empty.
fn require_code_and_email<'a>(
    code: &'a str,
    email: &'a str,
) -> Result<(&'a str, &'a str), ValidationError> {
    let (code, email) = (code.trim(), email.trim());
    if code.is_empty() || email.is_empty() {
        return Err(ValidationError::missing_pair("code", "email"));
    }
    Ok((code, email))
}
