//! Snapshot store port trait
//!
//! Holds the last pushed entry list, used to suppress duplicate pushes.

use async_trait::async_trait;

use crate::domain::entities::GameEntry;
use crate::error::SnapshotError;

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot; `Ok(None)` when nothing has been stored yet
    async fn load(&self) -> Result<Option<Vec<GameEntry>>, SnapshotError>;

    /// Replace the stored snapshot
    async fn save(&self, games: &[GameEntry]) -> Result<(), SnapshotError>;
}
