//! Verifier side of the auth protocol: mode-dispatched signature checks and
//! the validation chain that narrows a cryptographic pass with business
//! predicates.

use crate::issuance::package_digest;
use crate::keys::verify_digest;
use attesta_core::{
    hash_property, merkle_root, property_map, AuthType, Property, PropertyValue, PublicKey,
    Signature,
};
use std::collections::HashMap;

/// Verify a Privacy-mode signature. Fails closed on a mode or key-type
/// mismatch before any cryptography runs. Redacted properties verify
/// because their digests are the Merkle leaves either way.
pub fn verify_privacy(properties: &[Property], sign: &Signature, public_key: &PublicKey) -> bool {
    if sign.auth_type != AuthType::Privacy || sign.key_type != public_key.key_type {
        return false;
    }
    let leaves: Vec<String> = properties.iter().map(hash_property).collect();
    let root = merkle_root(&leaves);
    verify_digest(&root, &sign.value, &public_key.key, public_key.key_type)
}

/// Verify a Package-mode signature. The digest covers every raw value, so
/// any redaction or edit fails verification.
pub fn verify_package(properties: &[Property], sign: &Signature, public_key: &PublicKey) -> bool {
    if sign.auth_type != AuthType::Package || sign.key_type != public_key.key_type {
        return false;
    }
    let digest = package_digest(properties);
    verify_digest(&digest, &sign.value, &public_key.key, public_key.key_type)
}

/// Mode dispatch for verification. `Local` has no verification protocol;
/// requesting it is treated as a failed check, not a panic.
pub fn verify_by_auth_type(
    properties: &[Property],
    sign: &Signature,
    public_key: &PublicKey,
    auth_type: AuthType,
) -> bool {
    match auth_type {
        AuthType::Privacy => verify_privacy(properties, sign, public_key),
        AuthType::Package => verify_package(properties, sign, public_key),
        AuthType::Local => {
            tracing::warn!("LOCAL signatures cannot be verified by the issuance protocol");
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Verification chain
// ---------------------------------------------------------------------------

/// Start a verification chain. The pass flag is seeded from the
/// cryptographic check and only ever narrows from there.
pub fn verify_property(
    properties: &[Property],
    sign: &Signature,
    public_key: &PublicKey,
    auth_type: AuthType,
) -> Verification {
    Verification {
        passed: verify_by_auth_type(properties, sign, public_key, auth_type),
        view: property_map(properties),
    }
}

/// Verification validation chain with a sticky pass flag. Terminal methods
/// consume the builder; a finalized chain cannot be reused.
pub struct Verification {
    view: HashMap<String, PropertyValue>,
    passed: bool,
}

impl Verification {
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

    /// Return the payload if every check passed, `None` otherwise.
    pub fn confirm<T>(self, payload: T) -> Option<T> {
        self.passed.then_some(payload)
    }

    /// Invoke the supplier only on success. Side effects in the supplier
    /// (counters, reservations) must not run on a failed chain.
    pub fn supply<T>(self, supplier: impl FnOnce() -> T) -> Option<T> {
        self.passed.then(supplier)
    }
}
