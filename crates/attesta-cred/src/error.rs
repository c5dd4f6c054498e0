use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredError {
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("unsupported auth type: {0}")]
    UnsupportedAuthType(String),
}

impl From<CredError> for attesta_core::AttestaError {
    fn from(e: CredError) -> Self {
        attesta_core::AttestaError::Credential(e.to_string())
    }
}

pub type CredResult<T> = Result<T, CredError>;
