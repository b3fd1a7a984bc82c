//! Renderer port trait
//!
//! Turns an HTML document into an image. Output bytes are not assumed to be
//! stable across calls, even for identical input.

use async_trait::async_trait;

use crate::domain::entities::Image;
use crate::error::RenderError;

#[async_trait]
pub trait HtmlRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Image, RenderError>;
}
