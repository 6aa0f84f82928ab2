//! Ekehi ID Bot
//!
//! A Telegram bot that tells users their numeric Telegram ID so they can
//! paste it into the Ekehi app for membership verification.
//!
//! - `domain`: senders, inbound commands, outbound replies, the transport trait
//! - `application`: reply templates, command parsing and dispatch
//! - `infrastructure`: configuration and the Telegram/console transports

pub mod application;
pub mod domain;
pub mod infrastructure;
