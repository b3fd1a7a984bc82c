//! HTTP free-game feed client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::domain::ports::GameFeedClient;
use crate::error::FeedError;

/// Fetches the free-game list from a JSON API
pub struct HttpGameFeed {
    http: Client,
    url: String,
}

impl HttpGameFeed {
    pub fn new(url: String, timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GameFeedClient for HttpGameFeed {
    async fn fetch_body(&self) -> Result<Value, FeedError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| FeedError::Deserialization(e.to_string()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(FeedError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
