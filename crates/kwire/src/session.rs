//
// session.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

//! The identity and signing key of one client/kernel connection.

use std::fmt;

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::id;

#[derive(Clone)]
pub struct Session {
    /// The ID of the session; generated once, at construction
    id: String,

    /// The signing key, as a string. Empty when messages are unsigned.
    key: String,

    /// The HMAC keyed with `key`, if any
    hmac_key: Option<Hmac<Sha256>>,
}

impl Session {
    /// Create a new session that signs messages with `key`. An empty key
    /// creates an unsigned session.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();

        // HMAC accepts keys of any length, so keying can't fail
        let hmac_key = if key.is_empty() {
            None
        } else {
            Hmac::<Sha256>::new_from_slice(key.as_bytes()).ok()
        };

        Self {
            id: id::new_v4(),
            key,
            hmac_key,
        }
    }

    /// Create a session that neither signs outbound messages nor checks the
    /// signatures of inbound ones.
    pub fn unsigned() -> Self {
        Self::new("")
    }

    /// Generate a random signing key in the format used by kernel connection
    /// files: 16 random bytes, hex encoded.
    pub fn generate_key() -> String {
        let key_bytes = rand::thread_rng().gen::<[u8; 16]>();
        hex::encode(key_bytes)
    }

    /// The ID of the session.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The signing key; empty if the session is unsigned.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether messages in this session are signed.
    pub fn is_signed(&self) -> bool {
        self.hmac_key.is_some()
    }

    pub(crate) fn hmac_key(&self) -> Option<&Hmac<Sha256>> {
        self.hmac_key.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unsigned()
    }
}

// The key is a secret; keep it out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("signed", &self.is_signed())
            .finish()
    }
}
