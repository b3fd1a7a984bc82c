//! Free-game feed port trait

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FeedError;

/// Port trait for the upstream free-game API
#[async_trait]
pub trait GameFeedClient: Send + Sync {
    /// Issue one GET against the configured feed URL and return the decoded body
    async fn fetch_body(&self) -> Result<Value, FeedError>;
}
