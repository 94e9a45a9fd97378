//
// wire_message_header.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

use chrono::{DateTime, Local, SecondsFormat, TimeZone};
use kwshared::jupyter_message::{JupyterMessageHeader, PROTOCOL_VERSION};
use serde_json::Map;

use crate::id::make_message_id;
use crate::session::Session;

/// Create the header for a new outbound message, stamped with the current
/// local time.
///
/// - `session`: The session sending the message
/// - `msg_type`: The type of the message, e.g. `execute_request`
/// - `username`: The name of the user on whose behalf the message is sent
pub fn build_header(session: &Session, msg_type: &str, username: &str) -> JupyterMessageHeader {
    build_header_at(session, msg_type, username, Local::now())
}

/// Create the header for a new outbound message with an explicit timestamp.
pub fn build_header_at<Tz: TimeZone>(
    session: &Session,
    msg_type: &str,
    username: &str,
    date: DateTime<Tz>,
) -> JupyterMessageHeader
where
    Tz::Offset: std::fmt::Display,
{
    // ISO 8601 with a numeric offset (never `Z`) and whole seconds
    let date = date.to_rfc3339_opts(SecondsFormat::Secs, false);
    JupyterMessageHeader {
        msg_id: make_message_id(),
        msg_type: msg_type.to_string(),
        version: Some(PROTOCOL_VERSION.to_string()),
        username: Some(username.to_string()),
        session: Some(session.id().to_string()),
        date: Some(date),
        extra: Map::new(),
    }
}
