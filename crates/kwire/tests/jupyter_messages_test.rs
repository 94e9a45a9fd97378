//
// jupyter_messages_test.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
// Licensed under the Elastic License 2.0. See LICENSE.txt for license information.
//

//! Tests for classifying decoded messages and validating listen types

use kwire::jupyter_messages::{validate_listen_types, JupyterMsg};
use kwire::{OutboundMessage, Session, WireMessage};
use kwshared::jupyter_message::JupyterMessage;
use kwshared::message_type::MessageType;
use kwshared::reply_content::{ExecutionState, IsCompleteStatus, ReplyStatus, StreamName};
use serde_json::{json, Value};

/// Helper to push a message through the codec, the way a kernel's message
/// would arrive
fn receive(msg_type: &str, content: Value) -> JupyterMessage {
    let session = Session::new("kernel-key");
    let wire = WireMessage::encode(
        &session,
        "kernel",
        OutboundMessage::new(msg_type).with_content(content),
    )
    .expect("Failed to encode");
    let (_, message) = WireMessage::from_frames(&session, wire.frames).expect("Failed to decode");
    message
}

#[test]
fn test_status_messages() {
    match JupyterMsg::from(receive("status", json!({"execution_state": "busy"}))) {
        JupyterMsg::Status(status) => assert_eq!(status.execution_state, ExecutionState::Busy),
        other => panic!("Expected status, got {:?}", other),
    }
}

#[test]
fn test_stream_and_error_messages() {
    match JupyterMsg::from(receive("stream", json!({"name": "stderr", "text": "oops\n"}))) {
        JupyterMsg::Stream(stream) => {
            assert_eq!(stream.name, StreamName::Stderr);
            assert_eq!(stream.text, "oops\n");
        }
        other => panic!("Expected stream, got {:?}", other),
    }

    let error = receive(
        "error",
        json!({"ename": "ZeroDivisionError", "evalue": "division by zero", "traceback": ["line 1"]}),
    );
    match JupyterMsg::from(error) {
        JupyterMsg::Error(error) => {
            assert_eq!(error.ename, "ZeroDivisionError");
            assert_eq!(error.traceback, vec!["line 1".to_string()]);
        }
        other => panic!("Expected error, got {:?}", other),
    }
}

#[test]
fn test_reply_messages() {
    let reply = receive("execute_reply", json!({"status": "ok", "execution_count": 3}));
    match JupyterMsg::from(reply) {
        JupyterMsg::ExecuteReply(reply) => {
            assert_eq!(reply.status, ReplyStatus::Ok);
            assert_eq!(reply.execution_count, Some(3));
        }
        other => panic!("Expected execute_reply, got {:?}", other),
    }

    let reply = receive("is_complete_reply", json!({"status": "incomplete", "indent": "    "}));
    match JupyterMsg::from(reply) {
        JupyterMsg::IsCompleteReply(reply) => {
            assert_eq!(reply.status, IsCompleteStatus::Incomplete);
            assert_eq!(reply.indent.as_deref(), Some("    "));
        }
        other => panic!("Expected is_complete_reply, got {:?}", other),
    }

    let reply = receive(
        "complete_reply",
        json!({"status": "ok", "matches": ["print", "property"], "cursor_start": 0, "cursor_end": 2}),
    );
    match JupyterMsg::from(reply) {
        JupyterMsg::CompleteReply(reply) => assert_eq!(reply.matches.len(), 2),
        other => panic!("Expected complete_reply, got {:?}", other),
    }
}

#[test]
fn test_aborted_execute_reply() {
    let reply = receive("execute_reply", json!({"status": "aborted", "execution_count": 4}));
    match JupyterMsg::from(reply) {
        JupyterMsg::ExecuteReply(reply) => assert_eq!(reply.status, ReplyStatus::Aborted),
        other => panic!("Expected execute_reply, got {:?}", other),
    }

    // Older kernels say `abort`
    let reply = receive("execute_reply", json!({"status": "abort"}));
    match JupyterMsg::from(reply) {
        JupyterMsg::ExecuteReply(reply) => assert_eq!(reply.status, ReplyStatus::Aborted),
        other => panic!("Expected execute_reply, got {:?}", other),
    }
}

#[test]
fn test_other_replies_and_events() {
    let reply = receive(
        "history_reply",
        json!({"status": "ok", "history": [[1, 1, "x = 1"], [1, 2, "x"]]}),
    );
    match JupyterMsg::from(reply) {
        JupyterMsg::HistoryReply(reply) => assert_eq!(reply.history.len(), 2),
        other => panic!("Expected history_reply, got {:?}", other),
    }

    let reply = receive(
        "comm_info_reply",
        json!({"status": "ok", "comms": {"c1": {"target_name": "jupyter.widget"}}}),
    );
    match JupyterMsg::from(reply) {
        JupyterMsg::CommInfoReply(reply) => assert!(reply.comms.contains_key("c1")),
        other => panic!("Expected comm_info_reply, got {:?}", other),
    }

    let reply = receive("interrupt_reply", json!({"status": "ok"}));
    assert!(matches!(JupyterMsg::from(reply), JupyterMsg::InterruptReply(_)));

    match JupyterMsg::from(receive("clear_output", json!({"wait": true}))) {
        JupyterMsg::ClearOutput(clear) => assert!(clear.wait),
        other => panic!("Expected clear_output, got {:?}", other),
    }

    match JupyterMsg::from(receive("input_reply", json!({"value": "42"}))) {
        JupyterMsg::InputReply(reply) => assert_eq!(reply.value, "42"),
        other => panic!("Expected input_reply, got {:?}", other),
    }
}

#[test]
fn test_every_listenable_type_is_classified() {
    // Minimal content for each kind; none of them should fall through
    let samples = [
        ("execute_reply", json!({"status": "ok"})),
        ("inspect_reply", json!({"status": "ok"})),
        ("complete_reply", json!({"status": "ok", "cursor_start": 0, "cursor_end": 0})),
        ("history_reply", json!({})),
        ("is_complete_reply", json!({"status": "complete"})),
        ("comm_info_reply", json!({})),
        (
            "kernel_info_reply",
            json!({"status": "ok", "protocol_version": "5.3", "language_info": {"name": "r"}}),
        ),
        ("shutdown_reply", json!({})),
        ("interrupt_reply", json!({})),
        ("input_reply", json!({"value": ""})),
        ("execute_result", json!({"execution_count": 1, "data": {}})),
        ("stream", json!({"name": "stdout", "text": ""})),
        ("display_data", json!({"data": {}})),
        ("update_display_data", json!({"data": {}})),
        ("execute_input", json!({"code": ""})),
        ("error", json!({"ename": "E", "evalue": "v"})),
        ("status", json!({"execution_state": "idle"})),
        ("clear_output", json!({})),
    ];
    assert_eq!(samples.len(), MessageType::listenable().count());
    for (msg_type, content) in samples {
        assert_ne!(
            JupyterMsg::from(receive(msg_type, content)),
            JupyterMsg::Other,
            "{}",
            msg_type
        );
    }
}

#[test]
fn test_kernel_info_reply() {
    let reply = receive(
        "kernel_info_reply",
        json!({
            "status": "ok",
            "protocol_version": "5.3",
            "implementation": "ipython",
            "implementation_version": "8.0.0",
            "language_info": {
                "name": "python",
                "version": "3.12.0",
                "mimetype": "text/x-python",
                "file_extension": ".py",
                "codemirror_mode": {"name": "ipython", "version": 3}
            },
            "banner": "Python",
            "help_links": []
        }),
    );
    match JupyterMsg::from(reply) {
        JupyterMsg::KernelInfoReply(info) => {
            assert_eq!(info.protocol_version, "5.3");
            assert_eq!(info.language_info.name, "python");
            assert!(!info.debugger);
        }
        other => panic!("Expected kernel_info_reply, got {:?}", other),
    }
}

#[test]
fn test_display_data() {
    let message = receive(
        "display_data",
        json!({"data": {"text/plain": "42"}, "metadata": {}, "transient": {"display_id": "d1"}}),
    );
    assert_eq!(message.data("text/plain"), Some(&json!("42")));
    assert_eq!(message.data("image/png"), None);
    match JupyterMsg::from(message) {
        JupyterMsg::DisplayData(data) => assert!(data.transient.is_some()),
        other => panic!("Expected display_data, got {:?}", other),
    }
}

#[test]
fn test_mismatched_content_is_other() {
    let message = receive("status", json!({"execution_state": "sleeping"}));
    assert_eq!(JupyterMsg::from(message), JupyterMsg::Other);

    let message = receive("comm_open", json!({"comm_id": "1"}));
    assert_eq!(JupyterMsg::from(message), JupyterMsg::Other);
}

#[test]
fn test_validate_listen_types() {
    let types = validate_listen_types(&["status", "execute_reply", "stream"]).unwrap();
    assert_eq!(
        types,
        vec![MessageType::Status, MessageType::ExecuteReply, MessageType::Stream]
    );

    let err = validate_listen_types(&["status", "not_a_type"]).unwrap_err();
    assert_eq!(err.field, "msg_type");
    assert!(err.to_string().contains("not_a_type"));

    // Requests are never received
    assert!(validate_listen_types(&["execute_request"]).is_err());

    let none: [&str; 0] = [];
    assert!(validate_listen_types(&none).unwrap().is_empty());
}
