//
// message_type.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
// Licensed under the Elastic License 2.0. See LICENSE.txt for license information.
//
//

//! The registry of Jupyter message types.
//!
//! This is a closed set: the request kinds this workspace knows how to build,
//! plus the reply and event kinds a client may register interest in. The
//! decoder does not consult the registry; any `msg_type` string is accepted on
//! the way in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! message_types {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// A known Jupyter message type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum MessageType {
            $(
                #[serde(rename = $name)]
                $variant,
            )*
        }

        impl MessageType {
            /// Every registered message type, in declaration order.
            pub const ALL: &'static [MessageType] = &[$(MessageType::$variant),*];

            /// The wire name of the message type, as it appears in the
            /// `msg_type` header field.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(MessageType::$variant => $name,)*
                }
            }
        }

        impl FromStr for MessageType {
            type Err = UnknownMessageType;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(MessageType::$variant),)*
                    _ => Err(UnknownMessageType(s.to_string())),
                }
            }
        }
    };
}

message_types! {
    // Requests
    ExecuteRequest => "execute_request",
    InspectRequest => "inspect_request",
    CompleteRequest => "complete_request",
    HistoryRequest => "history_request",
    IsCompleteRequest => "is_complete_request",
    CommInfoRequest => "comm_info_request",
    KernelInfoRequest => "kernel_info_request",
    ShutdownRequest => "shutdown_request",
    InterruptRequest => "interrupt_request",
    InputRequest => "input_request",

    // Replies
    ExecuteReply => "execute_reply",
    InspectReply => "inspect_reply",
    CompleteReply => "complete_reply",
    HistoryReply => "history_reply",
    IsCompleteReply => "is_complete_reply",
    CommInfoReply => "comm_info_reply",
    KernelInfoReply => "kernel_info_reply",
    ShutdownReply => "shutdown_reply",
    InterruptReply => "interrupt_reply",
    InputReply => "input_reply",

    // IOPub events
    ExecuteResult => "execute_result",
    Stream => "stream",
    DisplayData => "display_data",
    UpdateDisplayData => "update_display_data",
    ExecuteInput => "execute_input",
    Error => "error",
    Status => "status",
    ClearOutput => "clear_output",
}

/// Raised when a string does not name a registered message type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown message type '{0}'")]
pub struct UnknownMessageType(pub String);

impl MessageType {
    /// Whether a client may register interest in receiving this message type.
    ///
    /// This is every reply and IOPub event kind; request kinds are excluded.
    pub fn is_listenable(&self) -> bool {
        !matches!(
            self,
            MessageType::ExecuteRequest
                | MessageType::InspectRequest
                | MessageType::CompleteRequest
                | MessageType::HistoryRequest
                | MessageType::IsCompleteRequest
                | MessageType::CommInfoRequest
                | MessageType::KernelInfoRequest
                | MessageType::ShutdownRequest
                | MessageType::InterruptRequest
                | MessageType::InputRequest
        )
    }

    /// Every message type a client may listen for.
    pub fn listenable() -> impl Iterator<Item = MessageType> {
        MessageType::ALL.iter().copied().filter(|t| t.is_listenable())
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
