use crate::error::{VaultError, VaultResult};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce as AesNonce};
use hkdf::Hkdf;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

// AES-256-GCM envelope encryption for stored credential material.
//
// The nonce is randomly generated per encryption and travels with the
// ciphertext; the GCM tag doubles as tamper evidence, which is what turns a
// wrong password into a clean decryption error instead of garbage output.

const NONCE_SIZE: usize = 12;

/// Encrypted envelope: nonce + ciphertext (includes the GCM tag).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
}

/// Encrypt plaintext under a 32-byte key.
pub fn encrypt(key: &Zeroizing<[u8; 32]>, plaintext: &[u8]) -> VaultResult<EncryptedEnvelope> {
    let cipher = Aes256Gcm::new_from_slice(&**key)
        .map_err(|e| VaultError::Encryption(format!("cipher init failed: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = AesNonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| VaultError::Encryption(format!("encryption failed: {}", e)))?;

    Ok(EncryptedEnvelope {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypt an envelope under a 32-byte key.
pub fn decrypt(key: &Zeroizing<[u8; 32]>, envelope: &EncryptedEnvelope) -> VaultResult<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(&**key)
        .map_err(|e| VaultError::Decryption(format!("cipher init failed: {}", e)))?;

    let nonce = AesNonce::from_slice(&envelope.nonce);

    cipher
        .decrypt(nonce, envelope.ciphertext.as_ref())
        .map_err(|e| VaultError::Decryption(format!("decryption failed: {}", e)))
}

/// Derive a 32-byte cipher key from a user password via HKDF-SHA256.
pub fn passphrase_key(password: &str) -> VaultResult<Zeroizing<[u8; 32]>> {
    let hk = Hkdf::<Sha256>::new(Some(b"attesta-passphrase"), password.as_bytes());
    let mut okm = [0u8; 32];
    hk.expand(b"attesta-credential-key", &mut okm)
        .map_err(|e| VaultError::KeyDerivation(format!("HKDF expand failed: {}", e)))?;
    Ok(Zeroizing::new(okm))
}

/// Decode a 64-char hex encryption key into cipher-key bytes.
pub fn key_from_hex(key_hex: &str) -> VaultResult<Zeroizing<[u8; 32]>> {
    let bytes = hex::decode(key_hex)
        .map_err(|e| VaultError::KeyDerivation(format!("encryption key is not hex: {}", e)))?;
    let key: [u8; 32] = bytes
        .try_into()
        .map_err(|_| VaultError::KeyDerivation("encryption key must be 32 bytes".into()))?;
    Ok(Zeroizing::new(key))
}
