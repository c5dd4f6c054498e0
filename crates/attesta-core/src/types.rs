use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// PropertyKind — disclosure state of a single attribute
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyKind {
    /// Plaintext attribute; hashing derives the digest from key and value.
    Raw,
    /// Redacted attribute; `value` already holds the digest and must not be
    /// re-hashed.
    Hash,
}

// ---------------------------------------------------------------------------
// PropertyDataType — marshaling tag for raw values
//
// Only used to convert the stored string back to a native value for
// validation predicates. Never participates in hashing or signing.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyDataType {
    String,
    Number,
    Date,
    Boolean,
}

// ---------------------------------------------------------------------------
// Property — one attribute plus its disclosure state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub key: String,
    pub value: String,
    #[serde(rename = "dataType", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<PropertyDataType>,
}

impl Property {
    pub fn raw(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: PropertyKind::Raw,
            key: key.into(),
            value: value.into(),
            data_type: None,
        }
    }

    pub fn raw_typed(
        key: impl Into<String>,
        value: impl Into<String>,
        data_type: PropertyDataType,
    ) -> Self {
        Self {
            kind: PropertyKind::Raw,
            key: key.into(),
            value: value.into(),
            data_type: Some(data_type),
        }
    }

    /// A redacted property whose value is already a digest.
    pub fn hashed(key: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            kind: PropertyKind::Hash,
            key: key.into(),
            value: digest.into(),
            data_type: None,
        }
    }

    pub fn is_redacted(&self) -> bool {
        self.kind == PropertyKind::Hash
    }
}

/// Build raw string properties from key/value pairs, preserving order.
pub fn properties_from_pairs(pairs: &[(&str, &str)]) -> Vec<Property> {
    pairs
        .iter()
        .map(|(k, v)| Property::raw_typed(*k, *v, PropertyDataType::String))
        .collect()
}

// ---------------------------------------------------------------------------
// PropertyValue — native view of a raw property value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Str(String),
    Num(f64),
    Date(chrono::NaiveDate),
    Bool(bool),
}

impl PropertyValue {
    /// Marshal a stored string back to a native value according to the
    /// property's data type tag. Unparseable input falls back to `Str`
    /// rather than failing; predicates decide what to do with it.
    pub fn marshal(value: &str, data_type: Option<PropertyDataType>) -> Self {
        match data_type.unwrap_or(PropertyDataType::String) {
            PropertyDataType::String => Self::Str(value.to_string()),
            PropertyDataType::Number => match value.parse::<f64>() {
                Ok(n) => Self::Num(n),
                Err(_) => Self::Str(value.to_string()),
            },
            PropertyDataType::Boolean => match value.parse::<bool>() {
                Ok(b) => Self::Bool(b),
                Err(_) => Self::Str(value.to_string()),
            },
            PropertyDataType::Date => match parse_date(value) {
                Some(d) => Self::Date(d),
                None => Self::Str(value.to_string()),
            },
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            // String-tagged numerals still compare usefully in predicates.
            Self::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<chrono::NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

fn parse_date(value: &str) -> Option<chrono::NaiveDate> {
    // Dates arrive either JSON-quoted (serialized) or bare.
    let bare = serde_json::from_str::<String>(value).unwrap_or_else(|_| value.to_string());
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&bare) {
        return Some(dt.date_naive());
    }
    chrono::NaiveDate::parse_from_str(&bare, "%Y-%m-%d").ok()
}

/// Key → native-value view over the non-redacted properties. Redacted
/// entries are withheld data; they never appear in the view.
pub fn property_map(properties: &[Property]) -> HashMap<String, PropertyValue> {
    properties
        .iter()
        .filter(|p| !p.is_redacted())
        .map(|p| {
            (
                p.key.clone(),
                PropertyValue::marshal(&p.value, p.data_type),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// AuthType / KeyType — closed protocol tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthType {
    /// Merkle-root signing; tolerates redacted properties on verification.
    Privacy,
    /// Whole-payload signing; any redaction breaks verification.
    Package,
    /// Holder-local signature, outside the issuance/verification protocol.
    Local,
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthType::Privacy => write!(f, "PRIVACY"),
            AuthType::Package => write!(f, "PACKAGE"),
            AuthType::Local => write!(f, "LOCAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    #[serde(rename = "ECDSA")]
    Ecdsa,
    #[serde(rename = "EDDSA")]
    Eddsa,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Ecdsa => write!(f, "ECDSA"),
            KeyType::Eddsa => write!(f, "EDDSA"),
        }
    }
}

// ---------------------------------------------------------------------------
// Signature / key material
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(rename = "authType")]
    pub auth_type: AuthType,
    #[serde(rename = "keyType")]
    pub key_type: KeyType,
    /// DER hex for ECDSA, raw 64-byte hex for EdDSA.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey {
    #[serde(rename = "type")]
    pub key_type: KeyType,
    pub key: String,
}

impl SecretKey {
    pub fn new(key_type: KeyType, key: impl Into<String>) -> Self {
        Self {
            key_type,
            key: key.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    #[serde(rename = "type")]
    pub key_type: KeyType,
    pub key: String,
}

impl PublicKey {
    pub fn new(key_type: KeyType, key: impl Into<String>) -> Self {
        Self {
            key_type,
            key: key.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordId — namespaced storage key
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_serde_tags() {
        let p = Property::raw_typed("age", "25", PropertyDataType::Number);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"type\":\"RAW\""));
        assert!(json.contains("\"dataType\":\"NUMBER\""));

        let back: Property = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_property_serde_without_data_type() {
        let p = Property::hashed("name", "ab".repeat(32));
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("dataType"));

        let back: Property = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, PropertyKind::Hash);
        assert_eq!(back.data_type, None);
    }

    #[test]
    fn test_signature_serde_tags() {
        let sig = Signature {
            auth_type: AuthType::Privacy,
            key_type: KeyType::Eddsa,
            value: "00".into(),
        };
        let json = serde_json::to_string(&sig).unwrap();
        assert!(json.contains("\"authType\":\"PRIVACY\""));
        assert!(json.contains("\"keyType\":\"EDDSA\""));
    }

    #[test]
    fn test_property_map_skips_redacted() {
        let properties = vec![
            Property::raw("name", "Kim"),
            Property::hashed("age", "ff".repeat(32)),
        ];
        let map = property_map(&properties);
        assert!(map.contains_key("name"));
        assert!(!map.contains_key("age"));
    }

    #[test]
    fn test_marshal_number() {
        let v = PropertyValue::marshal("25", Some(PropertyDataType::Number));
        assert_eq!(v.as_num(), Some(25.0));
    }

    #[test]
    fn test_marshal_number_fallback() {
        let v = PropertyValue::marshal("not-a-number", Some(PropertyDataType::Number));
        assert_eq!(v.as_str(), Some("not-a-number"));
        assert_eq!(v.as_num(), None);
    }

    #[test]
    fn test_marshal_bool() {
        let v = PropertyValue::marshal("true", Some(PropertyDataType::Boolean));
        assert_eq!(v.as_bool(), Some(true));
    }

    #[test]
    fn test_marshal_date_plain() {
        let v = PropertyValue::marshal("1996-12-28", Some(PropertyDataType::Date));
        let d = v.as_date().unwrap();
        assert_eq!((d.format("%Y-%m-%d")).to_string(), "1996-12-28");
    }

    #[test]
    fn test_marshal_date_json_quoted() {
        let v = PropertyValue::marshal(
            "\"1996-12-28T00:00:00.000Z\"",
            Some(PropertyDataType::Date),
        );
        assert!(v.as_date().is_some());
    }

    #[test]
    fn test_untagged_value_defaults_to_string() {
        let v = PropertyValue::marshal("Seoul", None);
        assert_eq!(v.as_str(), Some("Seoul"));
    }

    #[test]
    fn test_string_numeral_compares_as_number() {
        let v = PropertyValue::marshal("17", Some(PropertyDataType::String));
        assert_eq!(v.as_num(), Some(17.0));
    }

    #[test]
    fn test_properties_from_pairs_preserves_order() {
        let properties = properties_from_pairs(&[("name", "Kim"), ("age", "25")]);
        assert_eq!(properties[0].key, "name");
        assert_eq!(properties[1].key, "age");
        assert!(properties.iter().all(|p| p.kind == PropertyKind::Raw));
    }
}
