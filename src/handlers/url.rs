use crate::{storage::StorageError, AppState};
use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::ApiError;

const GENERATED_ALIAS_LEN: usize = 6;
const GENERATE_ATTEMPTS: usize = 10;

/// First path segments owned by fixed routes; an alias with one of these
/// names could never be redirected.
const RESERVED_ALIASES: &[&str] = &["health", "url"];

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub url: String,
    pub alias: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub id: i64,
    pub alias: String,
}

/// POST /url
pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveRequest>,
) -> Result<(StatusCode, Json<SaveResponse>), ApiError> {
    let url = req.url.trim();
    if url.is_empty() {
        return Err(ApiError::BadRequest("url must not be empty"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ApiError::BadRequest("url must start with http:// or https://"));
    }
    // The url ends up verbatim in the redirect's Location header.
    if HeaderValue::from_str(url).is_err() {
        return Err(ApiError::BadRequest("url contains invalid characters"));
    }

    let custom = req
        .alias
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (id, alias) = match custom {
        Some(alias) => {
            if !is_valid_alias(alias) {
                return Err(ApiError::BadRequest(
                    "alias may only contain letters, numbers, '-' and '_'",
                ));
            }
            if is_reserved_alias(alias) {
                return Err(ApiError::BadRequest("alias is reserved"));
            }
            let id = state.storage.save_url(url, alias).await?;
            (id, alias.to_owned())
        }
        None => save_with_generated_alias(&state, url).await?,
    };

    tracing::info!("Created alias '{}' -> {}", alias, url);
    Ok((StatusCode::CREATED, Json(SaveResponse { id, alias })))
}

/// DELETE /url/:alias
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(alias): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.storage.delete_url(&alias).await?;
    tracing::info!("Deleted alias '{}'", alias);
    Ok(StatusCode::NO_CONTENT)
}

// ── Helpers ────────────────────────────────────────────────────────────────

/// Insert under a fresh random alias, retrying only when the store reports
/// a collision.
async fn save_with_generated_alias(
    state: &AppState,
    url: &str,
) -> Result<(i64, String), StorageError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let alias = random_alias(GENERATED_ALIAS_LEN);
        if is_reserved_alias(&alias) {
            continue;
        }
        match state.storage.save_url(url, &alias).await {
            Ok(id) => return Ok((id, alias)),
            Err(StorageError::AliasAlreadyExists { .. }) if attempt < GENERATE_ATTEMPTS => {
                tracing::debug!("Generated alias '{}' collided, retrying", alias);
            }
            Err(e) => return Err(e),
        }
    }
}

fn is_valid_alias(alias: &str) -> bool {
    alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_reserved_alias(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}

/// Generate a random alphanumeric string of the given length.
fn random_alias(len: usize) -> String {
    use rand::Rng;
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_alias_has_requested_length_and_alphabet() {
        let alias = random_alias(GENERATED_ALIAS_LEN);
        assert_eq!(alias.len(), GENERATED_ALIAS_LEN);
        assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn alias_validation() {
        assert!(is_valid_alias("ex_1-a"));
        assert!(!is_valid_alias("has space"));
        assert!(!is_valid_alias("slash/y"));
    }

    #[test]
    fn fixed_route_names_are_reserved() {
        assert!(is_reserved_alias("health"));
        assert!(is_reserved_alias("url"));
        assert!(!is_reserved_alias("healthy"));
    }
}
