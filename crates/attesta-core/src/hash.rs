use crate::encoding::property_encoding;
use crate::types::{Property, PropertyKind};
use sha2::{Digest, Sha256};

/// SHA-256 of a UTF-8 string, lowercase hex.
///
/// The whole protocol is defined over this one function; hashes feed back
/// into further hashing as hex strings, not bytes.
pub fn hash_hex(msg: &str) -> String {
    hex::encode(Sha256::digest(msg.as_bytes()))
}

/// Digest of a single property.
///
/// Idempotent: a redacted property already carries its digest as the value,
/// and re-deriving it is impossible anyway since the raw data is gone.
pub fn hash_property(property: &Property) -> String {
    if property.kind == PropertyKind::Hash {
        return property.value.clone();
    }
    hash_hex(&property_encoding(property))
}

/// Replace each named property with its redacted form. Everything else
/// passes through untouched, so the Merkle leaf list is preserved.
pub fn redact(properties: &[Property], names: &[&str]) -> Vec<Property> {
    properties
        .iter()
        .map(|p| {
            if names.contains(&p.key.as_str()) {
                Property::hashed(p.key.clone(), hash_property(p))
            } else {
                p.clone()
            }
        })
        .collect()
}
