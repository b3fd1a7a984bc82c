//! Unified error types for the free-game notifier
//!
//! This module defines error types for each boundary:
//! - `FeedError`: upstream free-game API errors
//! - `RenderError`: HTML-to-image render service errors
//! - `SendError`: chat delivery errors (sessions and bot connections)
//! - `SnapshotError`: last-pushed snapshot persistence errors
//! - `ScheduleError`: cron registration errors
//! - `NotifierError`: errors surfaced by the notifier service itself
//! - `AppError`: HTTP handler errors (mapped to responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Free-game feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Render service errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Render service error: {status} - {message}")]
    Service { status: u16, message: String },

    #[error("Render service returned an empty image")]
    EmptyImage,
}

/// Delivery errors for a single send attempt
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rejected by bot (retcode {retcode}): {message}")]
    Rejected { retcode: i64, message: String },

    #[error("Invalid destination: {0}")]
    InvalidDestination(String),
}

/// Snapshot store errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Scheduler registration errors
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },

    #[error("Cron expression '{0}' never fires")]
    NoUpcoming(String),
}

/// Errors surfaced by the notifier service
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] SendError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
