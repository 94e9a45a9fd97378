//! Signing, framing and parsing of Jupyter protocol (v5.3) wire messages.
//!
//! The crate never touches a socket. Outbound, it turns a request into the
//! frame list a transport sends; inbound, it turns a received frame list back
//! into a verified [`kwshared::jupyter_message::JupyterMessage`].

#![allow(missing_docs)]

pub mod codec;
pub mod error;
pub mod framer;
pub mod id;
pub mod jupyter_messages;
pub mod requests;
pub mod session;
pub mod signer;
pub mod wire_message;
pub mod wire_message_header;

pub use error::{InvalidArgument, WireError};
pub use framer::{split_identities, Identities, DELIMITER};
pub use session::Session;
pub use wire_message::{decode_message, encode_message, OutboundMessage, WireMessage};
