use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("key derivation error: {0}")]
    KeyDerivation(String),

    #[error("encryption error: {0}")]
    Encryption(String),

    #[error("decryption error: {0}")]
    Decryption(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<VaultError> for attesta_core::AttestaError {
    fn from(e: VaultError) -> Self {
        attesta_core::AttestaError::Vault(e.to_string())
    }
}

pub type VaultResult<T> = Result<T, VaultError>;
