//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Platform integrations (Telegram, console)
//! - Shutdown: Stop signals for the bot process

pub mod config;
pub mod adapters;
pub mod shutdown;
