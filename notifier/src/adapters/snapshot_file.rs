//! File-backed snapshot store
//!
//! Keeps the last pushed entry list as pretty-printed JSON in a single file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::entities::GameEntry;
use crate::domain::ports::SnapshotStore;
use crate::error::SnapshotError;

pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<Vec<GameEntry>>, SnapshotError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // A literal `null` is a valid, empty snapshot.
        Ok(serde_json::from_str::<Option<Vec<GameEntry>>>(&content)?)
    }

    async fn save(&self, games: &[GameEntry]) -> Result<(), SnapshotError> {
        let content = serde_json::to_string_pretty(games)?;
        tokio::fs::write(&self.path, content).await?;
        tracing::debug!(path = %self.path.display(), count = games.len(), "Snapshot stored");
        Ok(())
    }
}
