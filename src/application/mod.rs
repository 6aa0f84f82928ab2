//! Application layer - Command handling
//!
//! This layer contains:
//! - Replies: The reply templates for each command
//! - Messaging: Command parsing and dispatch
//! - Services: Per-event handling against a transport

pub mod errors;
pub mod messaging;
pub mod replies;
pub mod services;
