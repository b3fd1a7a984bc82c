//! Render service adapter
//!
//! Posts HTML to a headless-browser screenshot service and reads the image
//! back from the response body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Serialize;

use crate::domain::entities::Image;
use crate::domain::ports::HtmlRenderer;
use crate::error::RenderError;

#[derive(Serialize)]
struct RenderRequest<'a> {
    html: &'a str,
    #[serde(rename = "type")]
    image_type: &'a str,
    full_page: bool,
}

pub struct HttpRenderService {
    http: Client,
    endpoint: String,
}

impl HttpRenderService {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, RenderError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl HtmlRenderer for HttpRenderService {
    async fn render(&self, html: &str) -> Result<Image, RenderError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&RenderRequest {
                html,
                image_type: "png",
                full_page: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RenderError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        if bytes.is_empty() {
            return Err(RenderError::EmptyImage);
        }

        let image = match mime {
            Some(mime) => Image::new(bytes.to_vec(), mime),
            None => Image::png(bytes.to_vec()),
        };
        tracing::debug!(
            size = image.bytes().len(),
            mime = image.mime(),
            "Rendered HTML to image"
        );
        Ok(image)
    }
}
