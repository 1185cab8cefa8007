// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session credential tests.
//!
//! Issue → verify must round-trip the subject for the configured
//! lifetime; every invalid credential must collapse to None rather than
//! error out.

use prepdeck::session::{issue_credential, verify_credential, Claims, SESSION_TTL_SECS};

const SIGNING_KEY: &[u8] = b"test_session_key_32_bytes_long!!";

#[test]
fn test_issue_verify_roundtrip() {
    let credential = issue_credential("subject-123", SIGNING_KEY).unwrap();

    let subject = verify_credential(&credential, SIGNING_KEY);
    assert_eq!(subject.as_deref(), Some("subject-123"));
}

#[test]
fn test_tampered_signature_rejected() {
    let credential = issue_credential("subject-123", SIGNING_KEY).unwrap();

    // Flip the last character of the signature segment.
    let mut tampered = credential.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    assert_eq!(verify_credential(&tampered, SIGNING_KEY), None);
}

#[test]
fn test_wrong_key_rejected() {
    let credential = issue_credential("subject-123", SIGNING_KEY).unwrap();

    assert_eq!(
        verify_credential(&credential, b"another_key_of_32_bytes_length!!"),
        None
    );
}

#[test]
fn test_garbage_credentials_collapse_to_none() {
    assert_eq!(verify_credential("", SIGNING_KEY), None);
    assert_eq!(verify_credential("not-a-token", SIGNING_KEY), None);
    assert_eq!(verify_credential("a.b.c", SIGNING_KEY), None);
}

#[test]
fn test_expired_credential_rejected() {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    // Issued and expired a week in the past.
    let claims = Claims {
        sub: "subject-123".to_string(),
        iat: now - 2 * SESSION_TTL_SECS as usize,
        exp: now - SESSION_TTL_SECS as usize,
    };

    let credential = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    assert_eq!(verify_credential(&credential, SIGNING_KEY), None);
}

#[test]
fn test_credential_lifetime_is_one_week() {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    let credential = issue_credential("subject-123", SIGNING_KEY).unwrap();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // Inspect the claims directly

    let token_data = decode::<Claims>(
        &credential,
        &DecodingKey::from_secret(SIGNING_KEY),
        &validation,
    )
    .unwrap();

    assert_eq!(
        token_data.claims.exp - token_data.claims.iat,
        SESSION_TTL_SECS as usize
    );
}
