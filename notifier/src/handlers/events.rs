//! Event handlers
//!
//! Receives OneBot v11 events posted by the bot implementations (HTTP POST
//! reporting) and dispatches chat commands. Commands run in the background;
//! the endpoint always answers without a quick operation.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::adapters::{OneBotClient, OneBotSession, ReplyTarget};
use crate::domain::ports::{Bot, Session};
use crate::error::AppError;
use crate::AppState;

/// The subset of a OneBot event the command dispatcher needs
#[derive(Debug, Deserialize)]
pub struct OneBotEvent {
    pub post_type: String,
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub self_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub raw_message: Option<String>,
}

impl OneBotEvent {
    fn reply_target(&self) -> Option<ReplyTarget> {
        match self.message_type.as_deref()? {
            "group" => self.group_id.map(ReplyTarget::Group),
            "private" => self.user_id.map(ReplyTarget::Private),
            _ => None,
        }
    }
}

/// The bot whose id matches the event's `self_id`, else the first one
fn select_bot(bots: &[Arc<OneBotClient>], self_id: Option<i64>) -> Option<Arc<OneBotClient>> {
    let by_id = self_id.and_then(|id| {
        let id = id.to_string();
        bots.iter().find(|bot| bot.id() == id)
    });
    by_id.or_else(|| bots.first()).cloned()
}

/// POST /onebot/event
pub async fn onebot_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let event: OneBotEvent = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse OneBot event");
        AppError::BadRequest(format!("Invalid JSON: {}", e))
    })?;

    if event.post_type != "message" {
        tracing::debug!(post_type = %event.post_type, "Ignoring non-message event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let Some(command) = event
        .raw_message
        .as_deref()
        .and_then(|text| state.commands.find(text))
    else {
        return Ok(StatusCode::NO_CONTENT);
    };

    let Some(target) = event.reply_target() else {
        tracing::warn!(
            message_type = ?event.message_type,
            "Command event without a reply target"
        );
        return Ok(StatusCode::NO_CONTENT);
    };

    let Some(bot) = select_bot(&state.bots, event.self_id) else {
        tracing::warn!("No bot connection configured, cannot reply to command");
        return Ok(StatusCode::NO_CONTENT);
    };

    tracing::info!(
        command = %command.info.name,
        bot = bot.id(),
        target = ?target,
        "Dispatching command"
    );

    let session: Arc<dyn Session> = Arc::new(OneBotSession::new(bot, target));
    let handler = Arc::clone(&command.handler);
    tokio::spawn(async move {
        handler.handle(session).await;
    });

    Ok(StatusCode::NO_CONTENT)
}
