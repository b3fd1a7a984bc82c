//! HTTP handlers
//!
//! Axum request handlers for the host endpoints.

pub mod events;
pub mod plugin;

pub use events::onebot_event;
pub use plugin::get_plugin;
