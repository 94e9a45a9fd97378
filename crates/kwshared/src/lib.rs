//! Jupyter message types shared by the kwire codec and its clients.

/// Decoded Jupyter messages and their headers
pub mod jupyter_message;

/// Kernel info reply records
pub mod kernel_info;

/// The registry of known message types
pub mod message_type;

/// Typed contents of kernel replies and events
pub mod reply_content;
