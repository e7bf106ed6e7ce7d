//! Public settings route handler.

use axum::{Json, extract::State};

use crate::db::settings::SettingsRepository;
use crate::error::Result;
use crate::models::Settings;
use crate::state::AppState;

/// `GET /api/settings`
///
/// The storefront reads these to render fees and discounts; the record is
/// lazily created with defaults on first read.
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>> {
    let settings = SettingsRepository::new(state.pool()).get_or_create().await?;
    Ok(Json(settings))
}
