//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use serde_json::{json, Value};

use crate::domain::entities::GameEntry;

/// A game that is free right now
pub fn free_game(title: &str) -> GameEntry {
    GameEntry::new(
        title,
        &format!("{} is free this week", title),
        &format!("https://cdn.example.com/{}.jpg", title.to_lowercase()),
        true,
    )
}

/// A game that becomes free next week
pub fn upcoming_game(title: &str) -> GameEntry {
    GameEntry::new(
        title,
        &format!("{} is free next week", title),
        &format!("https://cdn.example.com/{}.jpg", title.to_lowercase()),
        false,
    )
}

/// One free and one upcoming game
pub fn test_games() -> Vec<GameEntry> {
    vec![free_game("Hades"), upcoming_game("Celeste")]
}

/// A feed body in the wrapped `{"code", "data"}` shape
pub fn wrapped_body(games: &[GameEntry]) -> Value {
    json!({
        "code": 200,
        "message": "ok",
        "data": games,
    })
}
