//! Encrypted holder-side credential storage.
//!
//! A [`store::CredentialStore`] persists `{properties, signature}` bundles
//! through any [`attesta_core::StorageBackend`], encrypting each bundle with
//! a per-identifier key that can itself be protected by a user password.

pub mod envelope;
pub mod error;
pub mod in_memory_backend;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod storage;

pub use error::{VaultError, VaultResult};
pub use in_memory_backend::InMemoryBackend;
pub use store::{CredentialBundle, CredentialStore};
