use crate::types::Property;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// Deterministic attribute encoding.
//
// Every value is percent-escaped before base64 so that non-ASCII text (and
// the ":" / "," delimiters used by the protocol) normalize to a single
// canonical ASCII form. The escape set is exactly the URI-component
// unreserved set; changing it would silently break every existing signature.

/// Characters left unescaped: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-escape then base64-encode a UTF-8 string.
pub fn utf8_to_base64(s: &str) -> String {
    let escaped = utf8_percent_encode(s, URI_COMPONENT).to_string();
    STANDARD.encode(escaped.as_bytes())
}

/// Canonical `key:value` encoding of a property, used both as hash input
/// (Privacy mode leaves) and as the Package-mode payload element.
pub fn property_encoding(property: &Property) -> String {
    format!(
        "{}:{}",
        utf8_to_base64(&property.key),
        utf8_to_base64(&property.value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_roundtrips_plainly() {
        assert_eq!(utf8_to_base64("ABC"), "QUJD");
    }

    #[test]
    fn test_non_ascii_is_percent_escaped_first() {
        // "서울" → "%EC%84%9C%EC%9A%B8" → base64
        assert_eq!(utf8_to_base64("서울"), "JUVDJTg0JTlDJUVDJTlBJUI4");
    }

    #[test]
    fn test_delimiters_are_escaped() {
        // The protocol joins encodings with "," and "to" key/value with ":".
        // Both must be escaped inside values so boundaries stay unambiguous.
        assert_eq!(utf8_to_base64(","), STANDARD.encode("%2C"));
        assert_eq!(utf8_to_base64(":"), STANDARD.encode("%3A"));
    }

    #[test]
    fn test_unreserved_set_left_alone() {
        assert_eq!(utf8_to_base64("a-b_c.d!e~f*g'h(i)j"), {
            STANDARD.encode("a-b_c.d!e~f*g'h(i)j")
        });
    }

    #[test]
    fn test_property_encoding_shape() {
        let p = Property::raw("name", "Kim");
        assert_eq!(
            property_encoding(&p),
            format!("{}:{}", utf8_to_base64("name"), utf8_to_base64("Kim"))
        );
    }

    #[test]
    fn test_encoding_disambiguates_shifted_boundaries() {
        // {key:"a,b", value:"c"} and {key:"a", value:"b,c"} must encode
        // differently even though their unescaped concatenations collide.
        let p1 = Property::raw("a,b", "c");
        let p2 = Property::raw("a", "b,c");
        assert_ne!(property_encoding(&p1), property_encoding(&p2));
    }
}
