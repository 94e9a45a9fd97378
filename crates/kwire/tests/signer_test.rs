//
// signer_test.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
// Licensed under the Elastic License 2.0. See LICENSE.txt for license information.
//

//! Tests for message signing and signature verification

use kwire::signer::{sign, verify};
use kwire::{Session, WireError};

const HEADER: &[u8] = br#"{"msg_id":"a","msg_type":"status"}"#;
const CONTENT: &[u8] = br#"{"execution_state":"idle"}"#;

fn parts() -> [&'static [u8]; 4] {
    [HEADER, b"{}", b"{}", CONTENT]
}

#[test]
fn test_known_signature() {
    // HMAC-SHA256 of the concatenated parts, keyed with "abc123"
    let session = Session::new("abc123");
    assert_eq!(
        sign(&session, parts()),
        "28094d038ed3309081df5242f3a9da3f54547d5c1798f06668d0e7f06fb8b4c9"
    );
}

#[test]
fn test_signature_is_deterministic() {
    let session = Session::new("abc123");
    assert_eq!(sign(&session, parts()), sign(&session, parts()));

    // Two sessions with the same key produce the same signature
    let other = Session::new("abc123");
    assert_ne!(session.id(), other.id());
    assert_eq!(sign(&session, parts()), sign(&other, parts()));
}

#[test]
fn test_any_byte_change_changes_signature() {
    let session = Session::new("abc123");
    let original = sign(&session, parts());

    let owned: Vec<Vec<u8>> = parts().iter().map(|p| p.to_vec()).collect();
    for part in 0..4 {
        for index in 0..owned[part].len() {
            let mut mutated = owned.clone();
            mutated[part][index] ^= 0x20;
            let signature = sign(
                &session,
                [
                    mutated[0].as_slice(),
                    mutated[1].as_slice(),
                    mutated[2].as_slice(),
                    mutated[3].as_slice(),
                ],
            );
            assert_ne!(signature, original, "part {} byte {}", part, index);
        }
    }
}

#[test]
fn test_empty_key_means_empty_signature() {
    let session = Session::unsigned();
    assert!(!session.is_signed());
    assert_eq!(sign(&session, parts()), "");
}

#[test]
fn test_empty_key_accepts_any_signature() {
    let session = Session::new("");
    assert!(verify(&session, parts(), b"").is_ok());
    assert!(verify(&session, parts(), b"deadbeef").is_ok());
    assert!(verify(&session, parts(), b"not even hex").is_ok());
}

#[test]
fn test_verify_accepts_valid_signature() {
    let session = Session::new("abc123");
    let signature = sign(&session, parts());
    assert!(verify(&session, parts(), signature.as_bytes()).is_ok());
}

#[test]
fn test_verify_rejects_bad_signatures() {
    let session = Session::new("abc123");
    let signature = sign(&session, parts());

    assert!(matches!(
        verify(&session, parts(), b""),
        Err(WireError::UnsignedMessage)
    ));
    assert!(matches!(
        verify(&session, parts(), b"zz"),
        Err(WireError::InvalidSignature)
    ));
    assert!(matches!(
        verify(&session, parts(), signature.to_uppercase().as_bytes()),
        Err(WireError::InvalidSignature)
    ));
    assert!(matches!(
        verify(&session, parts(), &signature.as_bytes()[..62]),
        Err(WireError::InvalidSignature)
    ));
}

#[test]
fn test_session_key_is_not_in_debug_output() {
    let session = Session::new("super-secret-key");
    let debug = format!("{:?}", session);
    assert!(!debug.contains("super-secret-key"));
    assert!(debug.contains(session.id()));
}

#[test]
fn test_generated_keys() {
    let key = Session::generate_key();
    assert_eq!(key.len(), 32);
    assert!(hex::decode(&key).is_ok());
    assert_ne!(key, Session::generate_key());
    assert_eq!(Session::new(key.clone()).key(), key);
}
