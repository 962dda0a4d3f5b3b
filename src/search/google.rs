//! Google Places web service client.
//!
//! Uses the `autocomplete` endpoint for predictions and `details` (geometry
//! only) to turn a picked prediction into a coordinate.

use crate::config::SearchConfig;
use crate::search::{PlaceSearch, SearchError, Suggestion};
use crate::store::Coordinate;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub struct GooglePlaces {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: String,
    max_suggestions: usize,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    description: String,
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GooglePlaces {
    pub fn new(config: &SearchConfig, api_key: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build search HTTP client")?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            language: config.language.clone(),
            max_suggestions: config.max_suggestions,
        })
    }
}

#[async_trait]
impl PlaceSearch for GooglePlaces {
    async fn autocomplete(&self, query: &str) -> Result<Vec<Suggestion>, SearchError> {
        let url = format!("{}/autocomplete/json", self.endpoint);
        let response: AutocompleteResponse = self
            .client
            .get(url)
            .query(&[
                ("input", query),
                ("key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_autocomplete(response, self.max_suggestions)
    }

    async fn details(&self, suggestion: &Suggestion) -> Result<Coordinate, SearchError> {
        let url = format!("{}/details/json", self.endpoint);
        let response: DetailsResponse = self
            .client
            .get(url)
            .query(&[
                ("place_id", suggestion.place_id.as_str()),
                ("fields", "geometry"),
                ("key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_details(response, suggestion)
    }
}

fn check_status(status: String, error_message: Option<String>) -> Result<(), SearchError> {
    match status.as_str() {
        "OK" | "ZERO_RESULTS" => Ok(()),
        _ => Err(SearchError::Status {
            status,
            message: error_message,
        }),
    }
}

fn parse_autocomplete(
    response: AutocompleteResponse,
    max: usize,
) -> Result<Vec<Suggestion>, SearchError> {
    check_status(response.status, response.error_message)?;
    Ok(response
        .predictions
        .into_iter()
        .take(max)
        .map(|p| Suggestion {
            place_id: p.place_id,
            description: p.description,
        })
        .collect())
}

fn parse_details(
    response: DetailsResponse,
    suggestion: &Suggestion,
) -> Result<Coordinate, SearchError> {
    check_status(response.status, response.error_message)?;
    let location = response
        .result
        .and_then(|r| r.geometry)
        .map(|g| g.location)
        .ok_or(SearchError::MissingGeometry)?;
    Ok(Coordinate::new(location.lat, location.lng).with_description(suggestion.description.clone()))
}
