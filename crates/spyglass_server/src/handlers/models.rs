//! Model diagnostics.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

/// Active model plus everything the provider reports as usable.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Model the studio generates with unless a request overrides it.
    pub active: String,
    /// Models tried in order when the active one is unavailable.
    pub fallbacks: Vec<String>,
    /// Generation-capable models the provider currently lists.
    pub models: Vec<String>,
}

/// Report the active model, its fallbacks, and the live listing.
pub async fn list_models(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModelsResponse>, ApiError> {
    let models = state.catalog.list_generation_models().await?;

    Ok(Json(ModelsResponse {
        active: state.studio.generator().model_name().to_string(),
        fallbacks: state.fallback_models.clone(),
        models,
    }))
}
