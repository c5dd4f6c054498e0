//! Signature provider: raw sign/verify over hex digests, dispatched by key
//! type. ECDSA (secp256k1) signatures travel as DER hex; EdDSA (ed25519)
//! signatures travel as raw 64-byte hex.
//!
//! `verify_digest` never errors: every malformed or cross-algorithm input —
//! an ed25519 key handed to the ECDSA verifier and vice versa — resolves to
//! `false`, because callers fold verification into boolean protocol checks.

use crate::error::{CredError, CredResult};
use attesta_core::{KeyType, PublicKey, SecretKey};
use ed25519_dalek::Signer as _;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::elliptic_curve::sec1::ToEncodedPoint;

/// Sign a hex digest with a hex-encoded secret.
///
/// Malformed key material here is a caller defect, not untrusted input, so
/// it surfaces as an error rather than a silent `false`.
pub fn sign_digest(digest_hex: &str, secret_hex: &str, key_type: KeyType) -> CredResult<String> {
    match key_type {
        KeyType::Ecdsa => ecdsa_sign(digest_hex, secret_hex),
        KeyType::Eddsa => eddsa_sign(digest_hex, secret_hex),
    }
}

/// Verify a hex signature over a hex digest against a hex public key.
pub fn verify_digest(digest_hex: &str, sig_hex: &str, public_hex: &str, key_type: KeyType) -> bool {
    let verified = match key_type {
        KeyType::Ecdsa => ecdsa_verify(digest_hex, sig_hex, public_hex),
        KeyType::Eddsa => eddsa_verify(digest_hex, sig_hex, public_hex),
    };
    verified.is_some()
}

/// Derive the public key for a secret. Pure function, no session state.
pub fn public_key_from_secret(secret: &SecretKey) -> CredResult<PublicKey> {
    let key = match secret.key_type {
        KeyType::Ecdsa => {
            let signing_key = ecdsa_signing_key(&secret.key)?;
            // Uncompressed SEC1 (04 || x || y), the interchange form the
            // protocol has always used for secp256k1 keys.
            hex::encode(signing_key.verifying_key().to_encoded_point(false).as_bytes())
        }
        KeyType::Eddsa => {
            let signing_key = eddsa_signing_key(&secret.key)?;
            hex::encode(signing_key.verifying_key().to_bytes())
        }
    };
    Ok(PublicKey::new(secret.key_type, key))
}

fn decode_digest(digest_hex: &str) -> CredResult<Vec<u8>> {
    hex::decode(digest_hex).map_err(|e| CredError::InvalidDigest(format!("not hex: {}", e)))
}

// --- ECDSA / secp256k1 -----------------------------------------------------

fn ecdsa_signing_key(secret_hex: &str) -> CredResult<k256::ecdsa::SigningKey> {
    let bytes = hex::decode(secret_hex)
        .map_err(|e| CredError::InvalidSecretKey(format!("not hex: {}", e)))?;
    k256::ecdsa::SigningKey::from_slice(&bytes)
        .map_err(|e| CredError::InvalidSecretKey(format!("not a secp256k1 scalar: {}", e)))
}

fn ecdsa_sign(digest_hex: &str, secret_hex: &str) -> CredResult<String> {
    let digest = decode_digest(digest_hex)?;
    let signing_key = ecdsa_signing_key(secret_hex)?;
    let signature: k256::ecdsa::Signature = signing_key
        .sign_prehash(&digest)
        .map_err(|e| CredError::Signing(format!("ECDSA prehash signing failed: {}", e)))?;
    Ok(hex::encode(signature.to_der().as_bytes()))
}

fn ecdsa_verify(digest_hex: &str, sig_hex: &str, public_hex: &str) -> Option<()> {
    let digest = hex::decode(digest_hex).ok()?;
    let sig_bytes = hex::decode(sig_hex).ok()?;
    let pub_bytes = hex::decode(public_hex).ok()?;
    // Accepts compressed or uncompressed SEC1; a 32-byte ed25519 key is
    // neither, so it fails parsing and drops out as `false` upstream.
    let verifying_key = k256::ecdsa::VerifyingKey::from_sec1_bytes(&pub_bytes).ok()?;
    let signature = k256::ecdsa::Signature::from_der(&sig_bytes).ok()?;
    let signature = signature.normalize_s().unwrap_or(signature);
    verifying_key.verify_prehash(&digest, &signature).ok()
}

// --- EdDSA / ed25519 -------------------------------------------------------

fn eddsa_signing_key(secret_hex: &str) -> CredResult<ed25519_dalek::SigningKey> {
    let bytes = hex::decode(secret_hex)
        .map_err(|e| CredError::InvalidSecretKey(format!("not hex: {}", e)))?;
    let seed: [u8; 32] = bytes
        .try_into()
        .map_err(|_| CredError::InvalidSecretKey("expected a 32-byte ed25519 seed".into()))?;
    Ok(ed25519_dalek::SigningKey::from_bytes(&seed))
}

fn eddsa_sign(digest_hex: &str, secret_hex: &str) -> CredResult<String> {
    let digest = decode_digest(digest_hex)?;
    let signing_key = eddsa_signing_key(secret_hex)?;
    Ok(hex::encode(signing_key.sign(&digest).to_bytes()))
}

fn eddsa_verify(digest_hex: &str, sig_hex: &str, public_hex: &str) -> Option<()> {
    let digest = hex::decode(digest_hex).ok()?;
    let sig_bytes: [u8; 64] = hex::decode(sig_hex).ok()?.try_into().ok()?;
    let pub_bytes: [u8; 32] = hex::decode(public_hex).ok()?.try_into().ok()?;
    let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(&pub_bytes).ok()?;
    let signature = ed25519_dalek::Signature::from_bytes(&sig_bytes);
    verifying_key.verify_strict(&digest, &signature).ok()
}
