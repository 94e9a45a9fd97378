//
// requests.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
// Licensed under the Elastic License 2.0. See LICENSE.txt for license information.
//
//

//! Typed request contents, one record per request kind, and the builders that
//! validate them.
//!
//! Builders whose inputs are fully described by their types return the record
//! directly; the rest return `Result<_, InvalidArgument>` naming the field
//! that was rejected.

use std::collections::BTreeMap;

use kwshared::jupyter_message::JupyterChannel;
use kwshared::message_type::MessageType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec;
use crate::error::InvalidArgument;

/// The content of a request a client sends to a kernel.
pub trait Request: Serialize + Sized {
    /// The `msg_type` the request is sent with
    const MSG_TYPE: MessageType;

    /// The channel the request is sent on
    const CHANNEL: JupyterChannel = JupyterChannel::Shell;

    /// Serialize the request into the mapping sent as the message content.
    fn to_content(&self) -> Result<Map<String, Value>, InvalidArgument> {
        codec::encode_value("content", self)
    }
}

/// A cursor position within a code cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPos {
    /// An offset into the code, in characters (Unicode code points)
    Offset(usize),

    /// A zero-based line and column
    LineColumn { line: usize, column: usize },
}

impl From<usize> for CursorPos {
    fn from(offset: usize) -> Self {
        CursorPos::Offset(offset)
    }
}

impl CursorPos {
    /// Resolve the position to a character offset into `code`. Fails if the
    /// position lies outside the code.
    pub fn resolve(&self, code: &str) -> Result<usize, InvalidArgument> {
        match *self {
            CursorPos::Offset(offset) => {
                let len = code.chars().count();
                if offset > len {
                    return Err(InvalidArgument::new(
                        "pos",
                        format!("offset {} is past the end of the code ({} characters)", offset, len),
                    ));
                }
                Ok(offset)
            }
            CursorPos::LineColumn { line, column } => {
                let mut offset = 0;
                for (index, text) in code.split('\n').enumerate() {
                    let width = text.chars().count();
                    if index == line {
                        // A CRLF line ends before its '\r'
                        let width = text.strip_suffix('\r').map_or(width, |_| width - 1);
                        if column > width {
                            return Err(InvalidArgument::new(
                                "pos",
                                format!("column {} is past the end of line {} ({} characters)", column, line, width),
                            ));
                        }
                        return Ok(offset + column);
                    }
                    // Account for the newline
                    offset += width + 1;
                }
                Err(InvalidArgument::new(
                    "pos",
                    format!("line {} is past the end of the code", line),
                ))
            }
        }
    }
}

/// Content of an `execute_request`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteRequest {
    /// The code to execute
    pub code: String,

    /// Whether to execute the code as quietly as possible
    pub silent: bool,

    /// Whether to record the code in the kernel's history
    pub store_history: bool,

    /// Expressions to evaluate after the code runs, by name
    pub user_expressions: BTreeMap<String, String>,

    /// Whether the kernel may prompt for input on the stdin channel
    pub allow_stdin: bool,

    /// Whether to abort the execution queue if an error occurs
    pub stop_on_error: bool,
}

impl Request for ExecuteRequest {
    const MSG_TYPE: MessageType = MessageType::ExecuteRequest;
}

/// Create an `execute_request` with the protocol's defaults: not silent,
/// stored in history, stdin allowed, and not stopping on error.
pub fn execute_request(code: impl Into<String>) -> ExecuteRequest {
    ExecuteRequest {
        code: code.into(),
        silent: false,
        store_history: true,
        user_expressions: BTreeMap::new(),
        allow_stdin: true,
        stop_on_error: false,
    }
}

impl ExecuteRequest {
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn store_history(mut self, store_history: bool) -> Self {
        self.store_history = store_history;
        self
    }

    pub fn allow_stdin(mut self, allow_stdin: bool) -> Self {
        self.allow_stdin = allow_stdin;
        self
    }

    pub fn stop_on_error(mut self, stop_on_error: bool) -> Self {
        self.stop_on_error = stop_on_error;
        self
    }

    pub fn user_expression(mut self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        self.user_expressions.insert(name.into(), expression.into());
        self
    }
}

/// Content of an `inspect_request`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectRequest {
    pub code: String,

    /// The cursor position, in characters
    pub cursor_pos: usize,

    /// 0 for basic information, 1 for more detail (e.g. source code)
    pub detail_level: u8,
}

impl Request for InspectRequest {
    const MSG_TYPE: MessageType = MessageType::InspectRequest;
}

/// Create an `inspect_request` for the object at `pos` in `code`. `detail`
/// must be 0 or 1.
pub fn inspect_request(
    code: impl Into<String>,
    pos: impl Into<CursorPos>,
    detail: u8,
) -> Result<InspectRequest, InvalidArgument> {
    let code = code.into();
    let cursor_pos = pos.into().resolve(&code)?;
    if detail > 1 {
        return Err(InvalidArgument::new(
            "detail",
            format!("expected 0 or 1, got {}", detail),
        ));
    }
    Ok(InspectRequest {
        code,
        cursor_pos,
        detail_level: detail,
    })
}

/// Content of a `complete_request`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompleteRequest {
    pub code: String,

    /// The cursor position, in characters
    pub cursor_pos: usize,
}

impl Request for CompleteRequest {
    const MSG_TYPE: MessageType = MessageType::CompleteRequest;
}

/// Create a `complete_request` for the cursor at `pos` in `code`.
pub fn complete_request(
    code: impl Into<String>,
    pos: impl Into<CursorPos>,
) -> Result<CompleteRequest, InvalidArgument> {
    let code = code.into();
    let cursor_pos = pos.into().resolve(&code)?;
    Ok(CompleteRequest { code, cursor_pos })
}

/// Which part of the history a `history_request` asks for, with the fields
/// that kind of access requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "hist_access_type", rename_all = "lowercase")]
pub enum HistAccess {
    /// A range of cells from one session
    Range { session: i64, start: i64, stop: i64 },

    /// The last `n` cells
    Tail { n: u32 },

    /// The last `n` cells matching a glob pattern
    Search { pattern: String, n: u32 },
}

/// Content of a `history_request`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRequest {
    /// Whether to return output history as well as input
    pub output: bool,

    /// Whether to return the raw input rather than the transformed input
    pub raw: bool,

    /// Whether to drop duplicate entries from the results
    pub unique: bool,

    #[serde(flatten)]
    pub access: HistAccess,
}

impl Request for HistoryRequest {
    const MSG_TYPE: MessageType = MessageType::HistoryRequest;
}

/// Options for a `history_request`. Which of the optional fields are needed
/// depends on the access type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryOptions {
    pub output: bool,
    pub raw: bool,
    pub unique: bool,

    /// Required for `range`
    pub session: Option<i64>,

    /// Required for `range`
    pub start: Option<i64>,

    /// Required for `range`
    pub stop: Option<i64>,

    /// Required for `tail` and `search`
    pub n: Option<u32>,

    /// Required for `search`
    pub pattern: Option<String>,
}

/// Create a `history_request`. `hist_access_type` must be one of `range`,
/// `tail` or `search`, and the options must supply the fields that access
/// type needs.
pub fn history_request(
    hist_access_type: &str,
    options: HistoryOptions,
) -> Result<HistoryRequest, InvalidArgument> {
    fn required<T>(value: Option<T>, field: &str, access: &str) -> Result<T, InvalidArgument> {
        value.ok_or_else(|| {
            InvalidArgument::new(field, format!("required when hist_access_type is '{}'", access))
        })
    }

    let access = match hist_access_type {
        "range" => HistAccess::Range {
            session: required(options.session, "session", hist_access_type)?,
            start: required(options.start, "start", hist_access_type)?,
            stop: required(options.stop, "stop", hist_access_type)?,
        },
        "tail" => HistAccess::Tail {
            n: required(options.n, "n", hist_access_type)?,
        },
        "search" => HistAccess::Search {
            pattern: required(options.pattern, "pattern", hist_access_type)?,
            n: required(options.n, "n", hist_access_type)?,
        },
        other => {
            return Err(InvalidArgument::new(
                "hist_access_type",
                format!("expected 'range', 'tail' or 'search', got '{}'", other),
            ))
        }
    };

    Ok(HistoryRequest {
        output: options.output,
        raw: options.raw,
        unique: options.unique,
        access,
    })
}

/// Content of an `is_complete_request`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsCompleteRequest {
    pub code: String,
}

impl Request for IsCompleteRequest {
    const MSG_TYPE: MessageType = MessageType::IsCompleteRequest;
}

/// Ask the kernel whether `code` is ready to execute.
pub fn is_complete_request(code: impl Into<String>) -> IsCompleteRequest {
    IsCompleteRequest { code: code.into() }
}

/// Content of a `comm_info_request`. Without a target name the content is
/// empty and the kernel reports every open comm.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommInfoRequest {
    pub target_name: Option<String>,
}

impl Request for CommInfoRequest {
    const MSG_TYPE: MessageType = MessageType::CommInfoRequest;
}

pub fn comm_info_request(target_name: Option<&str>) -> CommInfoRequest {
    CommInfoRequest {
        target_name: target_name.map(str::to_string),
    }
}

/// Content of a `shutdown_request`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShutdownRequest {
    /// Whether the kernel will be restarted after shutting down
    pub restart: bool,
}

impl Request for ShutdownRequest {
    const MSG_TYPE: MessageType = MessageType::ShutdownRequest;
    const CHANNEL: JupyterChannel = JupyterChannel::Control;
}

pub fn shutdown_request(restart: bool) -> ShutdownRequest {
    ShutdownRequest { restart }
}

/// Content of an `input_reply`, answering a kernel's `input_request`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputReply {
    pub value: String,
}

impl Request for InputReply {
    const MSG_TYPE: MessageType = MessageType::InputReply;
    const CHANNEL: JupyterChannel = JupyterChannel::Stdin;
}

pub fn input_reply(value: impl Into<String>) -> InputReply {
    InputReply {
        value: value.into(),
    }
}

/// Content of a `kernel_info_request` (always empty)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KernelInfoRequest {}

impl Request for KernelInfoRequest {
    const MSG_TYPE: MessageType = MessageType::KernelInfoRequest;
}

pub fn kernel_info_request() -> KernelInfoRequest {
    KernelInfoRequest {}
}

/// Content of an `interrupt_request` (always empty)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterruptRequest {}

impl Request for InterruptRequest {
    const MSG_TYPE: MessageType = MessageType::InterruptRequest;
    const CHANNEL: JupyterChannel = JupyterChannel::Control;
}

pub fn interrupt_request() -> InterruptRequest {
    InterruptRequest {}
}
