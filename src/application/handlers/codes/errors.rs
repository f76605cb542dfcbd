//! Errors for access code administration.

use crate::domain::foundation::ValidationError;
use crate::ports::RegistryError;

/// The admin operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminOperation {
    Create,
    List,
    Detail,
    Update,
    Delete,
}

impl AdminOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminOperation::Create => "create",
            AdminOperation::List => "list",
            AdminOperation::Detail => "detail",
            AdminOperation::Update => "update",
            AdminOperation::Delete => "delete",
        }
    }

    /// Notice shown when the service refuses the request.
    fn rejection_message(&self) -> &'static str {
        match self {
            AdminOperation::Create => "Gagal membuat code",
            AdminOperation::List => "Gagal mengambil data codes",
            AdminOperation::Detail => NOT_FOUND_MESSAGE,
            AdminOperation::Update => "Gagal mengupdate code",
            AdminOperation::Delete => "Gagal menghapus code",
        }
    }

    /// Notice shown when the request never got a usable answer.
    fn transport_message(&self) -> &'static str {
        match self {
            AdminOperation::Create => "Terjadi kesalahan saat membuat code",
            AdminOperation::List => "Terjadi kesalahan saat mengambil data",
            AdminOperation::Detail => "Terjadi kesalahan saat mengambil detail",
            AdminOperation::Update => "Terjadi kesalahan saat mengupdate code",
            AdminOperation::Delete => "Terjadi kesalahan saat menghapus code",
        }
    }
}

impl std::fmt::Display for AdminOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const NOT_FOUND_MESSAGE: &str = "Code tidak ditemukan atau email tidak cocok";

/// Errors from access code handlers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodeAdminError {
    /// Input rejected before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The service refused the request.
    #[error("{operation} rejected by code service")]
    Rejected {
        operation: AdminOperation,
        message: Option<String>,
    },

    /// The code does not exist or is owned by another email.
    #[error("Code '{code}' not found for the given email")]
    NotFound { code: String },

    /// The code was created but the follow-up deactivation failed, so it
    /// is still active.
    #[error("Code '{code}' was created but could not be deactivated: {source}")]
    DeactivationFailed {
        code: String,
        #[source]
        source: RegistryError,
    },

    /// Network, HTTP status or decoding failure.
    #[error("{operation} failed: {source}")]
    Transport {
        operation: AdminOperation,
        #[source]
        source: RegistryError,
    },
}

impl CodeAdminError {
    /// Classify a registry error raised by `operation`.
    pub fn from_registry(operation: AdminOperation, error: RegistryError) -> Self {
        match error {
            RegistryError::Rejected { message } => CodeAdminError::Rejected { operation, message },
            other => CodeAdminError::Transport {
                operation,
                source: other,
            },
        }
    }

    /// Message for the operator's notice.
    pub fn user_message(&self) -> String {
        match self {
            CodeAdminError::Validation(e) => e.user_message(),
            CodeAdminError::Rejected {
                operation: AdminOperation::Create,
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            CodeAdminError::Rejected { operation, .. } => operation.rejection_message().to_string(),
            CodeAdminError::NotFound { .. } => NOT_FOUND_MESSAGE.to_string(),
            CodeAdminError::DeactivationFailed { code, .. } => {
                format!("Code {} berhasil dibuat tetapi gagal dinonaktifkan", code)
            }
            CodeAdminError::Transport { operation, .. } => operation.transport_message().to_string(),
        }
    }
}
