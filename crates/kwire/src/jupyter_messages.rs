//
// jupyter_messages.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
// Licensed under the Elastic License 2.0. See LICENSE.txt for license information.
//
//

use kwshared::jupyter_message::JupyterMessage;
use kwshared::kernel_info::KernelInfoReply;
use kwshared::message_type::MessageType;
use kwshared::reply_content::{
    ClearOutput, CommInfoReply, CompleteReply, DisplayData, ErrorContent, ExecuteInput,
    ExecuteReply, ExecuteResult, HistoryReply, InputRequest, InspectReply, InterruptReply,
    IsCompleteReply, JupyterStatus, ShutdownReply, Stream,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::InvalidArgument;
use crate::requests::InputReply;

/// An enum of the replies and events we know how to interpret. Anything else,
/// or anything whose content does not match its type, is `Other`.
#[derive(Debug, Clone, PartialEq)]
pub enum JupyterMsg {
    Status(JupyterStatus),
    Stream(Stream),
    ExecuteInput(ExecuteInput),
    ExecuteResult(ExecuteResult),
    DisplayData(DisplayData),
    UpdateDisplayData(DisplayData),
    ClearOutput(ClearOutput),
    Error(ErrorContent),
    ExecuteReply(ExecuteReply),
    KernelInfoReply(KernelInfoReply),
    IsCompleteReply(IsCompleteReply),
    CompleteReply(CompleteReply),
    InspectReply(InspectReply),
    ShutdownReply(ShutdownReply),
    HistoryReply(HistoryReply),
    CommInfoReply(CommInfoReply),
    InterruptReply(InterruptReply),
    InputRequest(InputRequest),
    InputReply(InputReply),
    Other,
}

/// Convert a JupyterMessage (generic type) into a JupyterMsg (specific type)
impl From<JupyterMessage> for JupyterMsg {
    fn from(msg: JupyterMessage) -> Self {
        let content = Value::Object(msg.content);
        match msg.header.msg_type.as_str() {
            "status" => parse(&msg.header.msg_id, content, JupyterMsg::Status),
            "stream" => parse(&msg.header.msg_id, content, JupyterMsg::Stream),
            "execute_input" => parse(&msg.header.msg_id, content, JupyterMsg::ExecuteInput),
            "execute_result" => parse(&msg.header.msg_id, content, JupyterMsg::ExecuteResult),
            "display_data" => parse(&msg.header.msg_id, content, JupyterMsg::DisplayData),
            "update_display_data" => {
                parse(&msg.header.msg_id, content, JupyterMsg::UpdateDisplayData)
            }
            "clear_output" => parse(&msg.header.msg_id, content, JupyterMsg::ClearOutput),
            "error" => parse(&msg.header.msg_id, content, JupyterMsg::Error),
            "execute_reply" => parse(&msg.header.msg_id, content, JupyterMsg::ExecuteReply),
            "kernel_info_reply" => parse(&msg.header.msg_id, content, JupyterMsg::KernelInfoReply),
            "is_complete_reply" => parse(&msg.header.msg_id, content, JupyterMsg::IsCompleteReply),
            "complete_reply" => parse(&msg.header.msg_id, content, JupyterMsg::CompleteReply),
            "inspect_reply" => parse(&msg.header.msg_id, content, JupyterMsg::InspectReply),
            "shutdown_reply" => parse(&msg.header.msg_id, content, JupyterMsg::ShutdownReply),
            "history_reply" => parse(&msg.header.msg_id, content, JupyterMsg::HistoryReply),
            "comm_info_reply" => parse(&msg.header.msg_id, content, JupyterMsg::CommInfoReply),
            "interrupt_reply" => parse(&msg.header.msg_id, content, JupyterMsg::InterruptReply),
            "input_request" => parse(&msg.header.msg_id, content, JupyterMsg::InputRequest),
            "input_reply" => parse(&msg.header.msg_id, content, JupyterMsg::InputReply),
            _ => JupyterMsg::Other,
        }
    }
}

fn parse<T: DeserializeOwned>(msg_id: &str, content: Value, wrap: fn(T) -> JupyterMsg) -> JupyterMsg {
    match serde_json::from_value::<T>(content) {
        Ok(content) => wrap(content),
        Err(e) => {
            log::debug!("Content of message {} does not match its type: {}", msg_id, e);
            JupyterMsg::Other
        }
    }
}

/// Check the message types a caller wants to listen for before they are
/// registered with a dispatcher. Every name must be a registered reply or
/// event type.
pub fn validate_listen_types<S: AsRef<str>>(names: &[S]) -> Result<Vec<MessageType>, InvalidArgument> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            match name.parse::<MessageType>() {
                Ok(msg_type) if msg_type.is_listenable() => Ok(msg_type),
                Ok(_) => Err(InvalidArgument::new(
                    "msg_type",
                    format!("'{}' is a request type; it is never received", name),
                )),
                Err(e) => Err(InvalidArgument::new("msg_type", e.to_string())),
            }
        })
        .collect()
}
