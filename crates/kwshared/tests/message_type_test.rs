//
// message_type_test.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
// Licensed under the Elastic License 2.0. See LICENSE.txt for license information.
//

//! Tests for the message type registry

use std::collections::HashSet;

use kwshared::message_type::{MessageType, UnknownMessageType};

#[test]
fn test_wire_names_round_trip() {
    for msg_type in MessageType::ALL {
        let parsed: MessageType = msg_type.as_str().parse().unwrap();
        assert_eq!(&parsed, msg_type);
        assert_eq!(msg_type.to_string(), msg_type.as_str());

        // Serde uses the same names
        let json = serde_json::to_value(msg_type).unwrap();
        assert_eq!(json, serde_json::Value::String(msg_type.as_str().to_string()));
    }

    let names: HashSet<&str> = MessageType::ALL.iter().map(|t| t.as_str()).collect();
    assert_eq!(names.len(), MessageType::ALL.len());
}

#[test]
fn test_unknown_names_are_rejected() {
    assert_eq!(
        "execute-reply".parse::<MessageType>(),
        Err(UnknownMessageType("execute-reply".to_string()))
    );
    assert!("".parse::<MessageType>().is_err());
    assert!("comm_open".parse::<MessageType>().is_err());
}

#[test]
fn test_listenable_set() {
    let listenable: HashSet<&str> = MessageType::listenable().map(|t| t.as_str()).collect();
    let expected: HashSet<&str> = [
        "execute_result",
        "execute_reply",
        "inspect_reply",
        "complete_reply",
        "history_reply",
        "is_complete_reply",
        "comm_info_reply",
        "kernel_info_reply",
        "shutdown_reply",
        "interrupt_reply",
        "stream",
        "display_data",
        "update_display_data",
        "execute_input",
        "error",
        "status",
        "clear_output",
        "input_reply",
    ]
    .into_iter()
    .collect();
    assert_eq!(listenable, expected);

    assert!(!MessageType::ExecuteRequest.is_listenable());
    assert!(!MessageType::InputRequest.is_listenable());
}
