//
// reply_content.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

//! Typed contents of the replies and IOPub events a kernel sends.
//!
//! Fields the protocol marks optional (or that older kernels leave out) carry
//! defaults so that a well-formed message is never rejected for omitting them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The execution state reported by a `status` message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionState {
    /// The kernel is starting up
    Starting,
    /// The kernel is busy handling a request
    Busy,
    /// The kernel is idle
    Idle,
}

/// Content of a `status` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JupyterStatus {
    pub execution_state: ExecutionState,
}

/// Whether a reply succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Ok,
    Error,

    /// The request was dropped from the queue, e.g. after an earlier error
    /// with `stop_on_error` set. ipykernel sends `aborted`; older kernels
    /// send `abort`.
    #[serde(rename = "aborted", alias = "abort")]
    Aborted,
}

/// The stream a `stream` message was written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamName {
    Stdout,
    Stderr,
}

/// Content of a `stream` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub name: StreamName,
    pub text: String,
}

/// Content of an `execute_input` message; the kernel rebroadcasts the code it
/// is about to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteInput {
    pub code: String,

    #[serde(default)]
    pub execution_count: u32,
}

/// Content of `display_data` and `update_display_data` messages
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayData {
    /// A MIME bundle: mimetype to representation
    pub data: Map<String, Value>,

    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Transient data such as the `display_id`
    pub transient: Option<Map<String, Value>>,
}

/// Content of an `execute_result` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteResult {
    pub execution_count: u32,

    pub data: Map<String, Value>,

    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Content of an `error` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContent {
    pub ename: String,
    pub evalue: String,

    #[serde(default)]
    pub traceback: Vec<String>,
}

/// Content of an `execute_reply` message
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteReply {
    pub status: ReplyStatus,

    pub execution_count: Option<u32>,

    /// Set when `status` is `error`
    pub ename: Option<String>,
    pub evalue: Option<String>,
    pub traceback: Option<Vec<String>>,
}

/// Verdict of an `is_complete_reply`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsCompleteStatus {
    Complete,
    Incomplete,
    Invalid,
    Unknown,
}

/// Content of an `is_complete_reply` message
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsCompleteReply {
    pub status: IsCompleteStatus,

    /// Suggested indentation for the next line, when `incomplete`
    pub indent: Option<String>,
}

/// Content of a `complete_reply` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteReply {
    pub status: ReplyStatus,

    #[serde(default)]
    pub matches: Vec<String>,

    pub cursor_start: u32,
    pub cursor_end: u32,

    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Content of an `inspect_reply` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectReply {
    pub status: ReplyStatus,

    #[serde(default)]
    pub found: bool,

    #[serde(default)]
    pub data: Map<String, Value>,

    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Content of a `shutdown_reply` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutdownReply {
    #[serde(default = "default_ok")]
    pub status: ReplyStatus,

    #[serde(default)]
    pub restart: bool,
}

/// Content of an `input_request` message on the stdin channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRequest {
    pub prompt: String,

    #[serde(default)]
    pub password: bool,
}

/// Content of a `history_reply` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryReply {
    #[serde(default = "default_ok")]
    pub status: ReplyStatus,

    /// `(session, line_number, input)` entries, or
    /// `(session, line_number, (input, output))` when output was requested
    #[serde(default)]
    pub history: Vec<Value>,
}

/// Content of a `comm_info_reply` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommInfoReply {
    #[serde(default = "default_ok")]
    pub status: ReplyStatus,

    /// Open comms by ID, each with its `target_name`
    #[serde(default)]
    pub comms: Map<String, Value>,
}

/// Content of an `interrupt_reply` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptReply {
    #[serde(default = "default_ok")]
    pub status: ReplyStatus,
}

/// Content of a `clear_output` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearOutput {
    /// Wait to clear the output until new output is available
    #[serde(default)]
    pub wait: bool,
}

fn default_ok() -> ReplyStatus {
    ReplyStatus::Ok
}
