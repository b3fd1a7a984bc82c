//! Application layer
//!
//! Contains use cases and service orchestration.
//! The notifier service coordinates the feed, renderer, chat and snapshot ports;
//! the command registry routes chat commands to it.

pub mod commands;
pub mod notifier_service;

pub use commands::{CommandInfo, CommandRegistry, FREEGAME_COMMAND, FREEGAME_DESCRIPTION};
pub use notifier_service::NotifierService;
