//! Mobile-friendly error types.

use wishy_core::share::VCardError;
use wishy_core::ShareError;

/// Mobile-friendly error type.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MobileError {
    #[error("Unsupported content: {0}")]
    Unsupported(String),

    #[error("Missing content: {0}")]
    MissingContent(String),

    #[error("Invalid vCard: {0}")]
    InvalidVCard(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ShareError> for MobileError {
    fn from(err: ShareError) -> Self {
        match err {
            ShareError::NotShareIntent | ShareError::Unsupported(_) => {
                MobileError::Unsupported(err.to_string())
            }
            ShareError::MissingContent => MobileError::MissingContent(err.to_string()),
            ShareError::VCard(e) => MobileError::from(e),
            ShareError::Serialization(e) => MobileError::SerializationError(e.to_string()),
        }
    }
}

impl From<VCardError> for MobileError {
    fn from(err: VCardError) -> Self {
        MobileError::InvalidVCard(err.to_string())
    }
}
