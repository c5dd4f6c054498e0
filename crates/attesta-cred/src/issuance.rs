//! Issuer side of the auth protocol: the two signing modes and the
//! validation chain that gates signing on business predicates.

use crate::error::{CredError, CredResult};
use crate::keys::sign_digest;
use attesta_core::{
    hash_hex, hash_property, merkle_root, properties_from_pairs, property_encoding, property_map,
    AuthType, Property, PropertyValue, SecretKey, Signature,
};
use std::collections::HashMap;

/// Privacy mode: sign the Merkle root of the per-property digests.
///
/// Because `hash_property` is idempotent on redacted entries, the holder can
/// later replace any subset of properties with their hashes without changing
/// the root — this is what makes selective disclosure verifiable.
pub fn auth_privacy(properties: &[Property], secret: &SecretKey) -> CredResult<Signature> {
    let leaves: Vec<String> = properties.iter().map(hash_property).collect();
    let root = merkle_root(&leaves);
    let value = sign_digest(&root, &secret.key, secret.key_type)?;
    Ok(Signature {
        auth_type: AuthType::Privacy,
        key_type: secret.key_type,
        value,
    })
}

/// Package mode: sign the digest of the full concatenated encoding. Any
/// change to any value — including redaction — breaks verification, so this
/// mode authenticates a fixed, fully-disclosed payload.
pub fn auth_package(properties: &[Property], secret: &SecretKey) -> CredResult<Signature> {
    let digest = package_digest(properties);
    let value = sign_digest(&digest, &secret.key, secret.key_type)?;
    Ok(Signature {
        auth_type: AuthType::Package,
        key_type: secret.key_type,
        value,
    })
}

pub(crate) fn package_digest(properties: &[Property]) -> String {
    let encodings: Vec<String> = properties.iter().map(property_encoding).collect();
    hash_hex(&encodings.join(","))
}

/// Mode dispatch for issuance. `Local` signatures are holder-side only and
/// never issued by this protocol; asking for one is a caller defect.
pub fn auth_by_auth_type(
    properties: &[Property],
    secret: &SecretKey,
    auth_type: AuthType,
) -> CredResult<Signature> {
    match auth_type {
        AuthType::Privacy => auth_privacy(properties, secret),
        AuthType::Package => auth_package(properties, secret),
        AuthType::Local => Err(CredError::UnsupportedAuthType(
            "LOCAL is not an issuance mode".into(),
        )),
    }
}

/// Convenience: build raw properties from key/value pairs and sign them.
pub fn issue_properties(
    pairs: &[(&str, &str)],
    secret: &SecretKey,
    auth_type: AuthType,
) -> CredResult<Signature> {
    auth_by_auth_type(&properties_from_pairs(pairs), secret, auth_type)
}

// ---------------------------------------------------------------------------
// Issuance chain
// ---------------------------------------------------------------------------

/// Start an issuance validation chain over a property set.
pub fn auth_property(properties: &[Property]) -> Issuance {
    Issuance {
        view: property_map(properties),
        properties: properties.to_vec(),
        passed: true,
    }
}

/// Issuance validation chain. The pass flag is sticky: once any predicate
/// fails, every later outcome is failure, and `sign` returns `Ok(None)`
/// without ever touching the secret key. Terminal `sign` consumes the
/// builder so a finalized chain cannot be reused.
pub struct Issuance {
    properties: Vec<Property>,
    view: HashMap<String, PropertyValue>,
    passed: bool,
}

impl Issuance {
    /// Run a predicate over the named property's native value. A missing or
    /// redacted property shows up as `None`.
    #[must_use]
    pub fn validate(
        mut self,
        key: &str,
        predicate: impl FnOnce(Option<&PropertyValue>) -> bool,
    ) -> Self {
        if !predicate(self.view.get(key)) {
            self.passed = false;
        }
        self
    }

    /// Sign if every validation passed; `Ok(None)` otherwise.
    pub fn sign(self, secret: &SecretKey, mode: AuthType) -> CredResult<Option<Signature>> {
        if !self.passed {
            return Ok(None);
        }
        auth_by_auth_type(&self.properties, secret, mode).map(Some)
    }
}
