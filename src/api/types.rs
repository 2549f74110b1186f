//! Wire-level helpers and error definitions for the routes API.

use serde::Deserialize;
use thiserror::Error;

use crate::model::{ModelError, Quest};

/// Errors that can occur talking to the routes API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or body transfer failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Routes API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the quest schema.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// A quest failed boundary validation.
    #[error("Invalid quest: {0}")]
    Invalid(#[from] ModelError),

    /// Base URL could not be joined with an endpoint path.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Quest id that cannot name a detail path.
    #[error("Invalid quest id: {0:?}")]
    InvalidId(String),

    /// Backend and fallback both unavailable, or the quest does not exist.
    #[error("Quest not found: {0}")]
    NotFound(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// List responses come either paginated or as a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    Paginated { results: Vec<serde_json::Value> },
    Bare(Vec<serde_json::Value>),
}

/// Extract quests from a list response.
///
/// Unknown shapes yield an empty list. Entries that fail to decode or
/// validate are skipped with a warning so one bad quest does not hide the
/// rest.
pub fn decode_quest_list(body: serde_json::Value) -> Vec<Quest> {
    let entries = match serde_json::from_value::<ListEnvelope>(body) {
        Ok(ListEnvelope::Paginated { results }) => results,
        Ok(ListEnvelope::Bare(items)) => items,
        Err(_) => {
            tracing::warn!("Unexpected quest list shape, treating as empty");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| match decode_quest(entry) {
            Ok(quest) => Some(quest),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping invalid quest in list");
                None
            }
        })
        .collect()
}

/// Decode and normalize a single quest.
pub fn decode_quest(body: serde_json::Value) -> ApiResult<Quest> {
    let quest: Quest = serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(quest.normalized()?)
}
