use thiserror::Error;

use crate::types::ProviderError;

/// Everything a login can fail with.
///
/// Only [`LoginError::ProfileFetch`] is recovered internally; the other
/// variants reach the caller's error continuation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoginError {
    #[error("Client initialization error: {0}")]
    ClientInitialization(String),

    #[error("Provider error: {0}")]
    Provider(ProviderError),

    #[error("Profile fetch error: {0}")]
    ProfileFetch(String),

    #[error("Precondition error: {0}")]
    Precondition(String),
}

impl From<ProviderError> for LoginError {
    fn from(err: ProviderError) -> Self {
        LoginError::Provider(err)
    }
}
