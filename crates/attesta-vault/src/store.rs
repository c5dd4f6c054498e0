//! Credential store: persists a holder's `{properties, signature}` bundle
//! encrypted under a per-identifier symmetric key.
//!
//! Two record namespaces per identifier keep data classes from colliding:
//! `key:{id}` holds the encryption key (itself password-encrypted when a
//! password is supplied) and `credential:{id}` holds the encrypted bundle.
//! Distinct identifiers never observe each other's records.

use crate::envelope::{decrypt, encrypt, key_from_hex, passphrase_key, EncryptedEnvelope};
use crate::error::{VaultError, VaultResult};
use attesta_core::{hash_hex, Property, RecordId, Signature, StorageBackend};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// A holder's stored credential: the property list and its signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialBundle {
    pub properties: Vec<Property>,
    pub signature: Signature,
}

pub struct CredentialStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> CredentialStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn key_record(id: &str) -> RecordId {
        RecordId::new(format!("key:{}", id))
    }

    fn credential_record(id: &str) -> RecordId {
        RecordId::new(format!("credential:{}", id))
    }

    /// Return the identifier's encryption key, generating and persisting a
    /// fresh one on first use. With a password the stored form is an
    /// encrypted envelope; without, the bare hex key.
    pub fn get_or_create_encryption_key(
        &self,
        id: &str,
        password: Option<&str>,
    ) -> VaultResult<Zeroizing<[u8; 32]>> {
        if let Some(key) = self.encryption_key(id, password)? {
            return Ok(key);
        }

        let key_hex = generate_key_hex();
        let stored = match password {
            Some(pass) => {
                let envelope = encrypt(&passphrase_key(pass)?, key_hex.as_bytes())?;
                serde_json::to_vec(&envelope)
                    .map_err(|e| VaultError::Serialization(format!("serialize failed: {}", e)))?
            }
            None => key_hex.as_bytes().to_vec(),
        };
        self.backend
            .put(&Self::key_record(id), &stored)
            .map_err(storage_err)?;
        tracing::debug!(id, "generated credential encryption key");
        key_from_hex(&key_hex)
    }

    /// Look up the identifier's encryption key without creating one.
    fn encryption_key(
        &self,
        id: &str,
        password: Option<&str>,
    ) -> VaultResult<Option<Zeroizing<[u8; 32]>>> {
        let stored = match self.backend.get(&Self::key_record(id)).map_err(storage_err)? {
            Some(stored) => stored,
            None => return Ok(None),
        };

        let key_hex: Zeroizing<String> = match password {
            Some(pass) => {
                let envelope: EncryptedEnvelope = serde_json::from_slice(&stored)
                    .map_err(|e| VaultError::Serialization(format!("stored key is not an envelope: {}", e)))?;
                let plain = decrypt(&passphrase_key(pass)?, &envelope)?;
                Zeroizing::new(String::from_utf8(plain).map_err(|_| {
                    VaultError::KeyDerivation("decrypted key is not UTF-8".into())
                })?)
            }
            None => Zeroizing::new(String::from_utf8(stored).map_err(|_| {
                VaultError::KeyDerivation("stored key is not UTF-8".into())
            })?),
        };
        key_from_hex(&key_hex).map(Some)
    }

    /// Serialize, encrypt, and persist a credential bundle under `id`.
    pub fn store_credential(
        &self,
        id: &str,
        properties: &[Property],
        signature: &Signature,
        password: Option<&str>,
    ) -> VaultResult<()> {
        let key = self.get_or_create_encryption_key(id, password)?;
        let bundle = CredentialBundle {
            properties: properties.to_vec(),
            signature: signature.clone(),
        };
        let plaintext = serde_json::to_vec(&bundle)
            .map_err(|e| VaultError::Serialization(format!("serialize failed: {}", e)))?;
        let envelope = encrypt(&key, &plaintext)?;
        let stored = serde_json::to_vec(&envelope)
            .map_err(|e| VaultError::Serialization(format!("serialize failed: {}", e)))?;
        self.backend
            .put(&Self::credential_record(id), &stored)
            .map_err(storage_err)?;
        tracing::debug!(id, properties = bundle.properties.len(), "stored credential");
        Ok(())
    }

    /// Load and decrypt the credential stored under `id`. `Ok(None)` when
    /// nothing was ever stored; a wrong password is a decryption error.
    pub fn load_credential(
        &self,
        id: &str,
        password: Option<&str>,
    ) -> VaultResult<Option<CredentialBundle>> {
        let key = match self.encryption_key(id, password)? {
            Some(key) => key,
            None => return Ok(None),
        };
        let stored = match self
            .backend
            .get(&Self::credential_record(id))
            .map_err(storage_err)?
        {
            Some(stored) => stored,
            None => return Ok(None),
        };

        let envelope: EncryptedEnvelope = serde_json::from_slice(&stored)
            .map_err(|e| VaultError::Serialization(format!("stored credential is not an envelope: {}", e)))?;
        let plaintext = decrypt(&key, &envelope)?;
        let bundle = serde_json::from_slice(&plaintext)
            .map_err(|e| VaultError::Serialization(format!("deserialize failed: {}", e)))?;
        Ok(Some(bundle))
    }
}

/// Fresh encryption key: random bytes plus a nanosecond timestamp, hashed
/// to a 64-char hex string.
fn generate_key_hex() -> Zeroizing<String> {
    let mut random = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut random);
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    Zeroizing::new(hash_hex(&format!("{}{}", hex::encode(random), nanos)))
}

fn storage_err(e: attesta_core::AttestaError) -> VaultError {
    VaultError::Storage(e.to_string())
}
