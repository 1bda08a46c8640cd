use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use std::sync::Arc;

use super::ApiError;

/// GET /:alias
///
/// Every request goes to storage; there is no cache in front of it.
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    Path(alias): Path<String>,
) -> Result<Redirect, ApiError> {
    let url = state.storage.get_url(&alias).await?;
    tracing::info!("Redirecting '{}' to {}", alias, url);
    Ok(Redirect::to(&url))
}
