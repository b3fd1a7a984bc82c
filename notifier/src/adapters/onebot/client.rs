//! OneBot v11 HTTP API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::entities::Message;
use crate::domain::ports::Bot;
use crate::error::SendError;

/// One bot connection
pub struct OneBotClient {
    id: String,
    http: Client,
    base_url: String,
    access_token: Option<String>,
}

#[derive(Serialize)]
struct SendGroupMessage {
    group_id: i64,
    message: Vec<Value>,
}

#[derive(Serialize)]
struct SendPrivateMessage {
    user_id: i64,
    message: Vec<Value>,
}

/// Common action response envelope
#[derive(Deserialize)]
struct ActionResponse {
    status: String,
    retcode: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    wording: Option<String>,
}

impl OneBotClient {
    pub fn new(
        id: String,
        base_url: String,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SendError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            id,
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    fn api_url(&self, action: &str) -> String {
        format!("{}/{}", self.base_url, action)
    }

    pub async fn send_group(&self, group_id: i64, message: Message) -> Result<(), SendError> {
        self.call(
            "send_group_msg",
            &SendGroupMessage {
                group_id,
                message: to_segments(&message),
            },
        )
        .await
    }

    pub async fn send_private(&self, user_id: i64, message: Message) -> Result<(), SendError> {
        self.call(
            "send_private_msg",
            &SendPrivateMessage {
                user_id,
                message: to_segments(&message),
            },
        )
        .await
    }

    async fn call<T: Serialize + Sync>(&self, action: &str, params: &T) -> Result<(), SendError> {
        let mut request = self.http.post(self.api_url(action)).json(params);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ActionResponse = response.json().await?;
        check_response(body)
    }
}

fn check_response(body: ActionResponse) -> Result<(), SendError> {
    // `async` (retcode 1) means the action was queued by the implementation.
    if body.status == "failed" || (body.retcode != 0 && body.status != "async") {
        return Err(SendError::Rejected {
            retcode: body.retcode,
            message: body.wording.or(body.msg).unwrap_or(body.status),
        });
    }
    Ok(())
}

/// Message as OneBot array-format segments
fn to_segments(message: &Message) -> Vec<Value> {
    match message {
        Message::Text(text) => vec![json!({"type": "text", "data": {"text": text}})],
        Message::Image(image) => vec![json!({
            "type": "image",
            "data": {"file": format!("base64://{}", image.to_base64())}
        })],
    }
}

fn parse_id(raw: &str) -> Result<i64, SendError> {
    raw.trim()
        .parse()
        .map_err(|_| SendError::InvalidDestination(raw.to_string()))
}

#[async_trait]
impl Bot for OneBotClient {
    fn id(&self) -> &str {
        &self.id
    }

    async fn send_message(&self, destination: &str, message: Message) -> Result<(), SendError> {
        let group_id = parse_id(destination)?;
        self.send_group(group_id, message).await
    }
}
