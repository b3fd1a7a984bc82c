//! Chat port traits
//!
//! A `Session` is the reply context of one command invocation.
//! A `Bot` is one live bot connection able to reach arbitrary destinations.

use async_trait::async_trait;

use crate::domain::entities::Message;
use crate::error::SendError;

/// Reply context bound to the command invocation that created it
#[async_trait]
pub trait Session: Send + Sync {
    async fn send(&self, message: Message) -> Result<(), SendError>;
}

/// A registered bot connection
#[async_trait]
pub trait Bot: Send + Sync {
    /// Identifier used in logs and delivery reports
    fn id(&self) -> &str;

    /// Send a message to a destination (a group id)
    async fn send_message(&self, destination: &str, message: Message) -> Result<(), SendError>;
}
