//
// signer.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

//! HMAC-SHA256 signatures over the JSON parts of a message.

use hmac::Mac;

use crate::error::WireError;
use crate::session::Session;

/// Sign the four JSON parts (header, parent header, metadata, content) of a
/// message. The HMAC covers the raw concatenation of the parts.
///
/// Returns the lowercase hex digest, or an empty string if the session is
/// unsigned.
pub fn sign(session: &Session, parts: [&[u8]; 4]) -> String {
    match session.hmac_key() {
        Some(hmac_key) => {
            let mut signature = hmac_key.clone();
            for part in parts {
                signature.update(part);
            }
            hex::encode(signature.finalize().into_bytes())
        }
        None => String::new(),
    }
}

/// Check the signature of the four JSON parts of an inbound message.
///
/// Unsigned sessions accept any signature, including none at all.
pub fn verify(session: &Session, parts: [&[u8]; 4], signature: &[u8]) -> Result<(), WireError> {
    let hmac_key = match session.hmac_key() {
        Some(hmac_key) => hmac_key,
        None => return Ok(()),
    };

    if signature.is_empty() {
        log::warn!("[session {}] Rejecting unsigned message", session.id());
        return Err(WireError::UnsignedMessage);
    }

    // Signatures are written in lowercase hex; anything else can't match
    if signature.iter().any(|b| b.is_ascii_uppercase()) {
        log::warn!("[session {}] Rejecting message with invalid signature", session.id());
        return Err(WireError::InvalidSignature);
    }
    let expected = hex::decode(signature).map_err(|_| {
        log::warn!("[session {}] Rejecting message with non-hex signature", session.id());
        WireError::InvalidSignature
    })?;

    let mut mac = hmac_key.clone();
    for part in parts {
        mac.update(part);
    }
    mac.verify_slice(&expected).map_err(|_| {
        log::warn!("[session {}] Rejecting message with invalid signature", session.id());
        WireError::InvalidSignature
    })
}
