//! Outgoing chat messages

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// A rendered image ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    bytes: Vec<u8>,
    mime: String,
}

impl Image {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    pub fn png(bytes: Vec<u8>) -> Self {
        Self::new(bytes, "image/png")
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// A message sent through a session or a bot connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Text(String),
    Image(Image),
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text(text.into())
    }
}

impl From<Image> for Message {
    fn from(image: Image) -> Self {
        Message::Image(image)
    }
}
