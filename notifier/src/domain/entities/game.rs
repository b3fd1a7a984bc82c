//! Game entry domain entity
//!
//! A game entry is one promotion record from the upstream free-game feed.
//! Records are kept in their wire form so that snapshot comparison sees
//! every upstream change; the well-known fields are read through accessors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A promotional game record
///
/// Holds the record exactly as the feed sent it. The well-known fields are
/// read leniently: a missing or wrongly typed value reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameEntry(Value);

impl GameEntry {
    #[cfg(test)]
    pub fn new(title: &str, description: &str, cover: &str, is_free_now: bool) -> Self {
        Self(serde_json::json!({
            "title": title,
            "description": description,
            "cover": cover,
            "is_free_now": is_free_now,
        }))
    }

    fn str_field(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.str_field("title")
    }

    pub fn description(&self) -> &str {
        self.str_field("description")
    }

    pub fn cover(&self) -> &str {
        self.str_field("cover")
    }

    /// True only for a literal `true`
    pub fn is_free_now(&self) -> bool {
        self.0.get("is_free_now").and_then(Value::as_bool) == Some(true)
    }
}

impl From<Value> for GameEntry {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Entries split by promotion state, each half in feed order
#[derive(Debug, Default)]
pub struct Classified<'a> {
    pub now_free: Vec<&'a GameEntry>,
    pub upcoming: Vec<&'a GameEntry>,
}

/// Stable partition on `is_free_now`
pub fn classify(games: &[GameEntry]) -> Classified<'_> {
    let (now_free, upcoming): (Vec<_>, Vec<_>) =
        games.iter().partition(|game| game.is_free_now());
    Classified { now_free, upcoming }
}

/// Extract the entry list from a feed response body.
///
/// Accepts either a bare array or an object carrying a `data` array.
/// Any other shape yields an empty list. Items are kept as sent, in order,
/// whatever their type.
pub fn games_from_body(body: Value) -> Vec<GameEntry> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items.into_iter().map(GameEntry::from).collect()
}

/// Canonical text form used for change detection
pub fn canonical_json(games: &[GameEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(games)
}
