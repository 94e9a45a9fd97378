//
// error.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

use thiserror::Error;

/// A request builder or encoder was handed input it cannot turn into a valid
/// message. Names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid argument '{field}': {reason}")]
pub struct InvalidArgument {
    /// The name of the field that failed validation
    pub field: String,

    /// Why the value was rejected
    pub reason: String,
}

impl InvalidArgument {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while encoding or decoding wire messages.
#[derive(Debug, Error)]
pub enum WireError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("no '<IDS|MSG>' delimiter in a message of {0} frames")]
    MissingDelimiter(usize),

    #[error("malformed message: expected at least 5 frames after the delimiter, got {0}")]
    MalformedMessage(usize),

    #[error("message has no signature, but signing is enabled for this session")]
    UnsignedMessage,

    #[error("message signature does not match its contents")]
    InvalidSignature,

    #[error("could not decode {part}: {reason}")]
    Decode {
        /// The message part that failed to decode (e.g. "header")
        part: &'static str,
        reason: String,
    },
}

impl WireError {
    /// A stable code for the error kind, e.g. `KW-4`.
    pub fn code(&self) -> String {
        let n = match self {
            WireError::InvalidArgument(_) => 1,
            WireError::MissingDelimiter(_) => 2,
            WireError::MalformedMessage(_) => 3,
            WireError::UnsignedMessage => 4,
            WireError::InvalidSignature => 5,
            WireError::Decode { .. } => 6,
        };
        format!("KW-{}", n)
    }

    /// Whether the error means the message may have been forged or altered.
    pub fn is_security_relevant(&self) -> bool {
        matches!(self, WireError::UnsignedMessage | WireError::InvalidSignature)
    }
}
