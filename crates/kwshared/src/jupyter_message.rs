//
// jupyter_message.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::message_type::MessageType;

/// The version of the Jupyter messaging protocol spoken on the wire.
pub const PROTOCOL_VERSION: &str = "5.3";

/// The header of a Jupyter message.
///
/// Only `msg_id` is required when decoding. Fields a peer leaves out stay
/// absent, and fields this crate does not model (e.g. `subshell_id`) are kept
/// in `extra`, so a decoded header serializes back to what the peer sent.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct JupyterMessageHeader {
    /// The message ID
    pub msg_id: String,

    /// The type of the message
    #[serde(default)]
    pub msg_type: String,

    /// The version of the Jupyter protocol
    pub version: Option<String>,

    /// The name of the user who sent the message
    pub username: Option<String>,

    /// The ID of the session that sent the message
    pub session: Option<String>,

    /// The date/time the message was created, in ISO 8601 format
    pub date: Option<String>,

    /// Any other header fields the peer sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The set of all Jupyter sockets ("channels") over which messages are sent and
/// received.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JupyterChannel {
    /// The shell channel
    Shell,

    /// The control channel
    Control,

    /// The stdin channel
    Stdin,

    /// The iopub channel
    IOPub,

    /// The heartbeat channel
    Heartbeat,
}

/// A Jupyter message decoded from its wire representation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JupyterMessage {
    /// The header of the message
    pub header: JupyterMessageHeader,

    /// The header of the message's parent (the message that caused this
    /// message); `None` when the sender supplied an empty parent header
    pub parent_header: Option<JupyterMessageHeader>,

    /// Additional metadata
    pub metadata: Map<String, Value>,

    /// The message payload
    pub content: Map<String, Value>,

    /// The binary buffers that followed the JSON parts
    #[serde(with = "hex_buffers", default)]
    pub buffers: Vec<Vec<u8>>,
}

impl JupyterMessage {
    /// The ID of this message.
    pub fn msg_id(&self) -> &str {
        &self.header.msg_id
    }

    /// The ID of the message that caused this one, if any.
    pub fn parent_msg_id(&self) -> Option<&str> {
        self.parent_header.as_ref().map(|h| h.msg_id.as_str())
    }

    /// The raw `msg_type` of this message.
    pub fn msg_type(&self) -> &str {
        &self.header.msg_type
    }

    /// The registered kind of this message, or `None` if the type is not one
    /// we know about.
    pub fn message_type(&self) -> Option<MessageType> {
        self.header.msg_type.parse().ok()
    }

    /// The `msg_type` of the parent message, if any.
    pub fn parent_msg_type(&self) -> Option<&str> {
        self.parent_header.as_ref().map(|h| h.msg_type.as_str())
    }

    /// The `execution_state` field of a status message's content.
    pub fn execution_state(&self) -> Option<&str> {
        if self.msg_type() != "status" {
            return None;
        }
        self.content.get("execution_state").and_then(Value::as_str)
    }

    /// True iff this is a `status` message reporting an idle kernel.
    pub fn is_idle_status(&self) -> bool {
        self.execution_state() == Some("idle")
    }

    /// The time the message was created, parsed from the header.
    pub fn date(&self) -> Option<DateTime<FixedOffset>> {
        let date = self.header.date.as_deref()?;
        DateTime::parse_from_rfc3339(date).ok()
    }

    /// Look up a MIME bundle entry in `content.data`, as carried by
    /// `display_data`, `execute_result` and `inspect_reply` messages.
    pub fn data(&self, mimetype: &str) -> Option<&Value> {
        self.content
            .get("data")
            .and_then(Value::as_object)
            .and_then(|data| data.get(mimetype))
    }
}

/// Buffers are opaque bytes; when a message is rendered as JSON they are
/// written as lowercase hex strings.
mod hex_buffers {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(buffers: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(buffers.iter().map(hex::encode))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error> {
        let encoded = Vec::<String>::deserialize(deserializer)?;
        encoded
            .iter()
            .map(|s| hex::decode(s).map_err(D::Error::custom))
            .collect()
    }
}
