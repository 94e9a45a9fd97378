//
// framer.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
// Licensed under the Elastic License 2.0. See LICENSE.txt for license information.
//
//

//! Splitting and assembling the frame lists that travel over the transport.
//!
//! A wire message looks like this:
//!
//! ```text
//! [ident, ..., "<IDS|MSG>", signature, header, parent_header, metadata, content, buffer, ...]
//! ```

use crate::error::WireError;

/// The frame that separates routing identities from the message proper.
pub const DELIMITER: &[u8] = b"<IDS|MSG>";

/// The routing identities that precede the delimiter. Opaque to the codec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identities(pub Vec<Vec<u8>>);

impl Identities {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_frames(self) -> Vec<Vec<u8>> {
        self.0
    }
}

impl From<Vec<Vec<u8>>> for Identities {
    fn from(frames: Vec<Vec<u8>>) -> Self {
        Self(frames)
    }
}

impl From<Vec<String>> for Identities {
    fn from(frames: Vec<String>) -> Self {
        Self(frames.into_iter().map(String::into_bytes).collect())
    }
}

// A single identity is a sequence of one.

impl From<Vec<u8>> for Identities {
    fn from(frame: Vec<u8>) -> Self {
        Self(vec![frame])
    }
}

impl From<&[u8]> for Identities {
    fn from(frame: &[u8]) -> Self {
        Self(vec![frame.to_vec()])
    }
}

impl From<&str> for Identities {
    fn from(frame: &str) -> Self {
        Self(vec![frame.as_bytes().to_vec()])
    }
}

impl From<String> for Identities {
    fn from(frame: String) -> Self {
        Self(vec![frame.into_bytes()])
    }
}

/// Split an inbound frame list at the delimiter.
///
/// Returns the identity frames (in their original order) and every frame
/// after the delimiter. The delimiter itself is dropped.
pub fn split_identities(mut frames: Vec<Vec<u8>>) -> Result<(Identities, Vec<Vec<u8>>), WireError> {
    let pos = frames
        .iter()
        .position(|frame| frame.as_slice() == DELIMITER)
        .ok_or(WireError::MissingDelimiter(frames.len()))?;

    let rest = frames.split_off(pos + 1);
    frames.truncate(pos);
    Ok((Identities(frames), rest))
}

/// Assemble an outbound frame list:
/// `idents ++ [delimiter, signature] ++ parts ++ buffers`.
pub fn assemble(
    idents: Identities,
    signature: String,
    parts: [Vec<u8>; 4],
    buffers: Vec<Vec<u8>>,
) -> Vec<Vec<u8>> {
    let mut frames = idents.into_frames();
    frames.reserve(2 + parts.len() + buffers.len());
    frames.push(DELIMITER.to_vec());
    frames.push(signature.into_bytes());
    frames.extend(parts);
    frames.extend(buffers);
    frames
}
