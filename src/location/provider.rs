//! Concrete location providers.

use crate::config::{LocationConfig, ProviderKind};
use crate::location::{Accuracy, GeoProvider, LocationError, PermissionStatus};
use crate::store::Coordinate;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Typical error radius of a city-level IP geolocation fix.
const IP_FIX_RADIUS_M: f64 = 5_000.0;

/// Build the provider selected in the config.
pub fn build_provider(config: &LocationConfig) -> Result<Arc<dyn GeoProvider>> {
    let provider: Arc<dyn GeoProvider> = match config.provider {
        ProviderKind::Static => Arc::new(StaticProvider::from_config(config)),
        ProviderKind::Ip => Arc::new(IpGeoProvider::from_config(config)?),
    };
    Ok(provider)
}

/// Reports a fixed position. Stands in for a device without a receiver.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    fix: Option<Coordinate>,
    foreground: PermissionStatus,
    background: PermissionStatus,
}

impl StaticProvider {
    pub fn new(
        fix: Option<Coordinate>,
        foreground: PermissionStatus,
        background: PermissionStatus,
    ) -> Self {
        Self {
            fix,
            foreground,
            background,
        }
    }

    pub fn from_config(config: &LocationConfig) -> Self {
        let fix = match (config.latitude, config.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        };
        Self::new(fix, config.foreground_permission, config.background_permission)
    }
}

#[async_trait]
impl GeoProvider for StaticProvider {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus, LocationError> {
        Ok(self.foreground)
    }

    async fn request_background_permission(&self) -> Result<PermissionStatus, LocationError> {
        Ok(self.background)
    }

    async fn current_position(&self, _accuracy: Accuracy) -> Result<Coordinate, LocationError> {
        let fix = self
            .fix
            .clone()
            .ok_or_else(|| LocationError::Unavailable("no static position configured".into()))?;
        validate(fix)
    }
}

/// Looks up the position of the machine's public IP address.
pub struct IpGeoProvider {
    client: reqwest::Client,
    endpoint: String,
    foreground: PermissionStatus,
    background: PermissionStatus,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl IpGeoProvider {
    pub fn from_config(config: &LocationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build geolocation HTTP client")?;
        Ok(Self {
            client,
            endpoint: config.ip_endpoint.clone(),
            foreground: config.foreground_permission,
            background: config.background_permission,
        })
    }
}

#[async_trait]
impl GeoProvider for IpGeoProvider {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus, LocationError> {
        Ok(self.foreground)
    }

    async fn request_background_permission(&self) -> Result<PermissionStatus, LocationError> {
        Ok(self.background)
    }

    async fn current_position(&self, accuracy: Accuracy) -> Result<Coordinate, LocationError> {
        // IP lookups have one precision; the tier cannot change the sample.
        let delivered = Accuracy::for_radius(IP_FIX_RADIUS_M);
        if delivered < accuracy {
            tracing::debug!(requested = ?accuracy, ?delivered, "IP fix is coarser than requested");
        }
        tracing::debug!(endpoint = %self.endpoint, "requesting IP geolocation");
        let response: IpApiResponse = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_ip_response(response)
    }
}

fn parse_ip_response(response: IpApiResponse) -> Result<Coordinate, LocationError> {
    if response.status != "success" {
        let reason = response
            .message
            .unwrap_or_else(|| format!("lookup status {}", response.status));
        return Err(LocationError::Unavailable(reason));
    }
    match (response.lat, response.lon) {
        (Some(lat), Some(lon)) => validate(Coordinate::new(lat, lon)),
        _ => Err(LocationError::InvalidPosition("response has no coordinates".into())),
    }
}

fn validate(coord: Coordinate) -> Result<Coordinate, LocationError> {
    let lat_ok = coord.latitude.is_finite() && (-90.0..=90.0).contains(&coord.latitude);
    let lon_ok = coord.longitude.is_finite() && (-180.0..=180.0).contains(&coord.longitude);
    if lat_ok && lon_ok {
        Ok(coord)
    } else {
        Err(LocationError::InvalidPosition(coord.short_label()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{acquire, AcquisitionOutcome, Platform};

    fn parse(json: &str) -> Result<Coordinate, LocationError> {
        parse_ip_response(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_parse_ip_success() {
        let coord = parse(
            r#"{"status":"success","country":"Switzerland","city":"Zurich","lat":47.3769,"lon":8.5417,"query":"203.0.113.7"}"#,
        )
        .unwrap();
        assert_eq!(coord, Coordinate::new(47.3769, 8.5417));
    }

    #[test]
    fn test_parse_ip_failure_status() {
        let err = parse(r#"{"status":"fail","message":"reserved range"}"#).unwrap_err();
        assert!(matches!(err, LocationError::Unavailable(ref m) if m == "reserved range"));
    }

    #[test]
    fn test_parse_ip_missing_coordinates() {
        let err = parse(r#"{"status":"success"}"#).unwrap_err();
        assert!(matches!(err, LocationError::InvalidPosition(_)));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(validate(Coordinate::new(91.0, 0.0)).is_err());
        assert!(validate(Coordinate::new(0.0, -181.0)).is_err());
        assert!(validate(Coordinate::new(f64::NAN, 0.0)).is_err());
        assert!(validate(Coordinate::new(-90.0, 180.0)).is_ok());
    }

    #[tokio::test]
    async fn test_static_provider_without_fix_fails() {
        let provider = StaticProvider::new(None, PermissionStatus::Granted, PermissionStatus::Granted);
        let outcome = acquire(&provider, Platform::Desktop, || {}).await;
        assert!(matches!(outcome, AcquisitionOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_static_provider_from_config() {
        let config = LocationConfig {
            provider: ProviderKind::Static,
            latitude: Some(10.0),
            longitude: Some(20.0),
            ..LocationConfig::default()
        };
        let provider = build_provider(&config).unwrap();
        let outcome = acquire(provider.as_ref(), Platform::Desktop, || {}).await;
        assert_eq!(outcome, AcquisitionOutcome::Located(Coordinate::new(10.0, 20.0)));
    }
}
