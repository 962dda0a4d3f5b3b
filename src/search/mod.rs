//! Place search: autocomplete suggestions and their coordinates.

pub mod google;
pub mod search_box;

use crate::config::SearchConfig;
use crate::store::Coordinate;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use search_box::SearchBox;

/// One autocomplete prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub place_id: String,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search service returned {status}{}", detail(.message))]
    Status {
        status: String,
        message: Option<String>,
    },
    #[error("place has no coordinates")]
    MissingGeometry,
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// Place-search collaborator.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn autocomplete(&self, query: &str) -> Result<Vec<Suggestion>, SearchError>;

    /// Resolve a suggestion to a coordinate labelled with its description.
    async fn details(&self, suggestion: &Suggestion) -> Result<Coordinate, SearchError>;
}

/// Build the search client, or `None` when no API key is configured.
pub fn build_search(config: &SearchConfig) -> Result<Option<Arc<dyn PlaceSearch>>> {
    let Some(key) = config.api_key() else {
        tracing::warn!("no Places API key configured, place search disabled");
        return Ok(None);
    };
    let client = google::GooglePlaces::new(config, key)?;
    Ok(Some(Arc::new(client)))
}
