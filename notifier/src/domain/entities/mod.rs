//! Domain entities
//!
//! Pure domain models: feed entries and the messages built from them.

pub mod game;
pub mod message;

pub use game::{canonical_json, classify, games_from_body, GameEntry};
pub use message::{Image, Message};
