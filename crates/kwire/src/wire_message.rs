//
// wire_message.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

use kwshared::jupyter_message::{JupyterMessage, JupyterMessageHeader};
use serde_json::{Map, Value};

use crate::codec;
use crate::error::WireError;
use crate::framer::{self, Identities};
use crate::requests::Request;
use crate::session::Session;
use crate::signer;
use crate::wire_message_header::build_header;

/// A message the caller wants to send, before it has a header or signature.
#[derive(Debug, Clone, Default)]
pub struct OutboundMessage {
    /// The type of the message, e.g. `execute_request`
    pub msg_type: String,

    /// Routing identities to place before the delimiter
    pub idents: Identities,

    /// The message payload; must be a JSON object if present
    pub content: Option<Value>,

    /// The header of the message being replied to; must be a JSON object if
    /// present
    pub parent_header: Option<Value>,

    /// Additional metadata; must be a JSON object if present
    pub metadata: Option<Value>,

    /// Binary buffers, each sent unmodified as its own frame
    pub buffers: Vec<Vec<u8>>,
}

impl OutboundMessage {
    pub fn new(msg_type: impl Into<String>) -> Self {
        Self {
            msg_type: msg_type.into(),
            ..Default::default()
        }
    }

    /// Create a message from a typed request.
    pub fn from_request<R: Request>(request: &R) -> Result<Self, WireError> {
        let content = request.to_content()?;
        Ok(Self::new(R::MSG_TYPE.as_str()).with_content(Value::Object(content)))
    }

    pub fn with_idents(mut self, idents: impl Into<Identities>) -> Self {
        self.idents = idents.into();
        self
    }

    pub fn with_content(mut self, content: Value) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Mark this message as a reply to the message with the given header.
    pub fn with_parent(mut self, parent: &JupyterMessageHeader) -> Self {
        match serde_json::to_value(parent) {
            Ok(value) => self.parent_header = Some(value),
            Err(e) => log::error!(
                "Failed to serialize parent header of message {}: {}",
                parent.msg_id,
                e
            ),
        }
        self
    }

    pub fn with_parent_header(mut self, parent_header: Value) -> Self {
        self.parent_header = Some(parent_header);
        self
    }

    pub fn with_buffers(mut self, buffers: Vec<Vec<u8>>) -> Self {
        self.buffers = buffers;
        self
    }
}

/// A message in its wire representation: the ordered list of frames handed
/// to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMessage {
    /// The ID of the message (from its header)
    pub msg_id: String,

    /// The frames of the message, identities first
    pub frames: Vec<Vec<u8>>,
}

impl WireMessage {
    /// Create a new wire message: build a header, encode the JSON parts, sign
    /// them and assemble the frames.
    pub fn encode(
        session: &Session,
        username: &str,
        message: OutboundMessage,
    ) -> Result<Self, WireError> {
        let content = codec::as_mapping("content", message.content)?;
        let metadata = codec::as_mapping("metadata", message.metadata)?;
        let parent_header = codec::as_mapping("parent_header", message.parent_header)?;

        // Derive a header for the message; the header struct always
        // serializes to an object
        let header = build_header(session, &message.msg_type, username);
        let msg_id = header.msg_id.clone();
        let header = codec::encode_value("header", &header)?;

        let parts = [
            codec::encode_part("header", Some(&header))?,
            codec::encode_part("parent_header", parent_header.as_ref())?,
            codec::encode_part("metadata", metadata.as_ref())?,
            codec::encode_part("content", content.as_ref())?,
        ];

        // Compute the HMAC signature from the four JSON parts
        let signature = signer::sign(
            session,
            [
                parts[0].as_slice(),
                parts[1].as_slice(),
                parts[2].as_slice(),
                parts[3].as_slice(),
            ],
        );

        log::trace!(
            "[session {}] Encoded {} message {} ({} identities, {} buffers)",
            session.id(),
            message.msg_type,
            msg_id,
            message.idents.0.len(),
            message.buffers.len()
        );

        let frames = framer::assemble(message.idents, signature, parts, message.buffers);
        Ok(WireMessage { msg_id, frames })
    }

    /// Create a new wire message from a typed request.
    pub fn from_request<R: Request>(
        session: &Session,
        username: &str,
        request: &R,
    ) -> Result<Self, WireError> {
        Self::encode(session, username, OutboundMessage::from_request(request)?)
    }

    /// Decode the frames that follow the delimiter (as returned by
    /// [`framer::split_identities`]) into a Jupyter message.
    ///
    /// The signature is checked before anything is parsed; on any error no
    /// part of the message is returned.
    pub fn decode(session: &Session, mut frames: Vec<Vec<u8>>) -> Result<JupyterMessage, WireError> {
        if frames.len() < 5 {
            return Err(WireError::MalformedMessage(frames.len()));
        }

        // Anything after the four JSON parts is a binary buffer
        let buffers = frames.split_off(5);
        let [signature, header, parent_header, metadata, content]: [Vec<u8>; 5] = frames
            .try_into()
            .map_err(|frames: Vec<Vec<u8>>| WireError::MalformedMessage(frames.len()))?;

        signer::verify(
            session,
            [
                header.as_slice(),
                parent_header.as_slice(),
                metadata.as_slice(),
                content.as_slice(),
            ],
            &signature,
        )?;

        let header = decode_header("header", &header)?.ok_or(WireError::Decode {
            part: "header",
            reason: String::from("header is empty"),
        })?;
        let parent_header = decode_header("parent_header", &parent_header)?;
        let metadata = codec::decode_part("metadata", &metadata)?;
        let content = codec::decode_part("content", &content)?;

        log::trace!(
            "[session {}] Decoded {} message {} ({} buffers)",
            session.id(),
            header.msg_type,
            header.msg_id,
            buffers.len()
        );

        Ok(JupyterMessage {
            header,
            parent_header,
            metadata,
            content,
            buffers,
        })
    }

    /// Decode a complete inbound frame list, identities included. Returns the
    /// identities alongside the message.
    pub fn from_frames(
        session: &Session,
        frames: Vec<Vec<u8>>,
    ) -> Result<(Identities, JupyterMessage), WireError> {
        let (idents, rest) = framer::split_identities(frames)?;
        let message = Self::decode(session, rest)?;
        Ok((idents, message))
    }
}

/// Encode a message into its frames. Returns the new message's ID and the
/// frame list.
pub fn encode_message(
    session: &Session,
    username: &str,
    message: OutboundMessage,
) -> Result<(String, Vec<Vec<u8>>), WireError> {
    let wire = WireMessage::encode(session, username, message)?;
    Ok((wire.msg_id, wire.frames))
}

/// Decode the frames that follow the delimiter into a Jupyter message.
pub fn decode_message(session: &Session, frames: Vec<Vec<u8>>) -> Result<JupyterMessage, WireError> {
    WireMessage::decode(session, frames)
}

// An empty header (as sent for the parent of an unsolicited message) decodes
// to `None`. Beyond that only `msg_id` is required; sparse headers from other
// peers are accepted as sent.
fn decode_header(
    part: &'static str,
    bytes: &[u8],
) -> Result<Option<JupyterMessageHeader>, WireError> {
    let map: Map<String, Value> = codec::decode_part(part, bytes)?;
    if map.is_empty() {
        return Ok(None);
    }
    serde_json::from_value(Value::Object(map))
        .map(Some)
        .map_err(|e| WireError::Decode {
            part,
            reason: e.to_string(),
        })
}
