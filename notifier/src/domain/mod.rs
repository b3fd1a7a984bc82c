//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing feed entries and messages
//! - `ports`: Trait definitions for external collaborators
//!   (feed, renderer, chat, snapshot storage, scheduling)

pub mod entities;
pub mod ports;
