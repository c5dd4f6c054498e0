//! End-to-end credential journey: issue under validation, store encrypted,
//! reload, redact, and verify the disclosed subset.

use attesta_core::{properties_from_pairs, redact, AuthType, KeyType, PropertyValue, SecretKey};
use attesta_cred::issuance::auth_property;
use attesta_cred::keys::public_key_from_secret;
use attesta_cred::verification::{verify_by_auth_type, verify_property};
use attesta_vault::{CredentialStore, InMemoryBackend};

const ISSUER_SECRET: &str = "2ef40452ec154cd38efdc8ffa52e7f513f7d2b2a77e028342bde96c369e4f77a";

#[test]
fn test_full_journey_privacy_mode() {
    // Issuer: validate the applicant's properties and sign the Merkle root.
    let secret = SecretKey::new(KeyType::Eddsa, ISSUER_SECRET);
    let public = public_key_from_secret(&secret).unwrap();
    let properties = properties_from_pairs(&[
        ("name", "Kim"),
        ("age", "25"),
        ("address", "Seoul"),
        ("membership", "gold"),
    ]);

    let signature = auth_property(&properties)
        .validate("age", |v| {
            v.and_then(PropertyValue::as_num).map_or(false, |n| n >= 19.0)
        })
        .validate("membership", |v| v.is_some())
        .sign(&secret, AuthType::Privacy)
        .unwrap()
        .expect("predicates hold, issuance must sign");

    // Holder: persist the credential password-encrypted, then reload it.
    let store = CredentialStore::new(InMemoryBackend::new());
    store
        .store_credential("kim", &properties, &signature, Some("1q2w3e4r"))
        .unwrap();
    let bundle = store
        .load_credential("kim", Some("1q2w3e4r"))
        .unwrap()
        .expect("stored credential must load");
    assert_eq!(bundle.properties, properties);
    assert_eq!(bundle.signature, signature);

    // Holder: disclose only name and age; address and membership stay hidden.
    let disclosed = redact(&bundle.properties, &["address", "membership"]);

    // Verifier: the redacted subset still verifies, the predicate runs over
    // the disclosed age, and the hidden address is invisible.
    let outcome = verify_property(&disclosed, &bundle.signature, &public, AuthType::Privacy)
        .validate("age", |v| {
            v.and_then(PropertyValue::as_num).map_or(false, |n| n >= 19.0)
        })
        .validate("address", |v| v.is_none())
        .supply(|| "entry-granted");
    assert_eq!(outcome, Some("entry-granted"));
}

#[test]
fn test_full_journey_package_mode_rejects_redaction() {
    let secret = SecretKey::new(KeyType::Ecdsa, ISSUER_SECRET);
    let public = public_key_from_secret(&secret).unwrap();
    let properties = properties_from_pairs(&[("name", "Kim"), ("age", "25")]);

    let signature = auth_property(&properties)
        .validate("name", |v| v.is_some())
        .sign(&secret, AuthType::Package)
        .unwrap()
        .unwrap();

    let store = CredentialStore::new(InMemoryBackend::new());
    store
        .store_credential("kim", &properties, &signature, None)
        .unwrap();
    let bundle = store.load_credential("kim", None).unwrap().unwrap();

    // Full disclosure verifies.
    assert!(verify_by_auth_type(
        &bundle.properties,
        &bundle.signature,
        &public,
        AuthType::Package
    ));

    // Any redaction breaks a package signature.
    let hidden = redact(&bundle.properties, &["age"]);
    assert!(!verify_by_auth_type(
        &hidden,
        &bundle.signature,
        &public,
        AuthType::Package
    ));
}

#[test]
fn test_issuance_refusal_leaves_nothing_to_store() {
    let secret = SecretKey::new(KeyType::Eddsa, ISSUER_SECRET);
    let properties = properties_from_pairs(&[("name", "Kim"), ("age", "17")]);

    let signature = auth_property(&properties)
        .validate("age", |v| {
            v.and_then(PropertyValue::as_num).map_or(false, |n| n >= 19.0)
        })
        .sign(&secret, AuthType::Privacy)
        .unwrap();
    assert!(signature.is_none());
}

#[test]
fn test_reloaded_credential_verifies_with_wrong_issuer_key_rejected() {
    let secret = SecretKey::new(KeyType::Ecdsa, ISSUER_SECRET);
    let public = public_key_from_secret(&secret).unwrap();
    let other_secret = SecretKey::new(
        KeyType::Ecdsa,
        "f351840fba553b777dcdd76b410b37924ffc0a1f2876be5b52440397b15ab6ab",
    );
    let other_public = public_key_from_secret(&other_secret).unwrap();

    let properties = properties_from_pairs(&[("name", "Kim")]);
    let signature = auth_property(&properties)
        .sign(&secret, AuthType::Privacy)
        .unwrap()
        .unwrap();

    let store = CredentialStore::new(InMemoryBackend::new());
    store
        .store_credential("kim", &properties, &signature, None)
        .unwrap();
    let bundle = store.load_credential("kim", None).unwrap().unwrap();

    assert!(verify_by_auth_type(
        &bundle.properties,
        &bundle.signature,
        &public,
        AuthType::Privacy
    ));
    assert!(!verify_by_auth_type(
        &bundle.properties,
        &bundle.signature,
        &other_public,
        AuthType::Privacy
    ));
}
