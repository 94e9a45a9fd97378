//
// id.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
// Licensed under the Elastic License 2.0. See LICENSE.txt for license information.
//
//

//! Identifier generation for sessions and messages.

use rand::Rng;

/// Generate a random RFC 4122 version 4 UUID string, e.g.
/// `"c0ffee00-1234-4abc-9def-0123456789ab"`.
pub fn new_v4() -> String {
    new_v4_with(&mut rand::thread_rng())
}

/// Generate a version 4 UUID string from the given source of randomness.
///
/// The version and variant bits are set on fixed byte positions of the
/// random array, so the result does not depend on host byte order.
pub fn new_v4_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 16] = rng.gen();
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

/// Generate a unique message ID for Jupyter messages.
pub fn make_message_id() -> String {
    new_v4()
}
