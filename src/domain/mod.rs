//! Domain layer - Core types with no external dependencies
//! 
//! This layer contains:
//! - Entities: Senders, inbound commands, outbound replies, the command registry
//! - Traits: Abstraction over the messaging transport (Bot)

pub mod entities;
pub mod traits;
