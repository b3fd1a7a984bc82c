//! Plugin handlers

use axum::{extract::State, Json};

use crate::plugin::PluginManifest;
use crate::AppState;

/// GET /plugin
pub async fn get_plugin(State(state): State<AppState>) -> Json<PluginManifest> {
    Json(state.manifest.as_ref().clone())
}
