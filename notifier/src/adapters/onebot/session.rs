//! Reply session for OneBot message events

use std::sync::Arc;

use async_trait::async_trait;

use super::client::OneBotClient;
use crate::domain::entities::Message;
use crate::domain::ports::Session;
use crate::error::SendError;

/// Where replies of a session go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTarget {
    Group(i64),
    Private(i64),
}

/// Replies through the bot that received the command
pub struct OneBotSession {
    bot: Arc<OneBotClient>,
    target: ReplyTarget,
}

impl OneBotSession {
    pub fn new(bot: Arc<OneBotClient>, target: ReplyTarget) -> Self {
        Self { bot, target }
    }
}

#[async_trait]
impl Session for OneBotSession {
    async fn send(&self, message: Message) -> Result<(), SendError> {
        match self.target {
            ReplyTarget::Group(group_id) => self.bot.send_group(group_id, message).await,
            ReplyTarget::Private(user_id) => self.bot.send_private(user_id, message).await,
        }
    }
}
