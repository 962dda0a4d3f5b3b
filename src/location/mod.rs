//! Device location: permission handling and the one-shot acquisition flow.
//!
//! The flow asks for foreground permission, optionally for background
//! permission on platforms that have that tier, then samples a single
//! position at [`Accuracy::Balanced`]. It never fails outward; every problem
//! is folded into an [`AcquisitionOutcome`].

pub mod provider;
pub mod session;

use crate::store::Coordinate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PERMISSION_DENIED_MESSAGE: &str = "Permission to access location was denied";
pub const FETCH_ERROR_MESSAGE: &str = "Error getting location";
pub const BACKGROUND_NOTICE_TITLE: &str = "Limited Location Access";
pub const BACKGROUND_NOTICE_BODY: &str =
    "Background location access not granted. Some features may be limited.";

/// Precision/power tradeoff for a position sample, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Accuracy {
    Lowest,
    Low,
    Balanced,
    High,
    Highest,
    BestForNavigation,
}

impl Accuracy {
    /// Finest tier a fix with the given error radius (meters) satisfies.
    pub fn for_radius(meters: f64) -> Self {
        match meters {
            m if m <= 5.0 => Accuracy::BestForNavigation,
            m if m <= 10.0 => Accuracy::Highest,
            m if m <= 100.0 => Accuracy::High,
            m if m <= 1_000.0 => Accuracy::Balanced,
            m if m <= 3_000.0 => Accuracy::Low,
            _ => Accuracy::Lowest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Ios,
    Android,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else {
            Platform::Desktop
        }
    }

    /// Whether background location is granted separately from foreground.
    pub fn has_background_tier(self) -> bool {
        matches!(self, Platform::Ios)
    }
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location unavailable: {0}")]
    Unavailable(String),
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Permission and geolocation collaborator.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus, LocationError>;

    async fn request_background_permission(&self) -> Result<PermissionStatus, LocationError>;

    async fn current_position(&self, accuracy: Accuracy) -> Result<Coordinate, LocationError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionOutcome {
    Located(Coordinate),
    PermissionDenied,
    Failed(String),
}

impl AcquisitionOutcome {
    /// Message for the screen's error state, if this outcome is a failure.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            AcquisitionOutcome::Located(_) => None,
            AcquisitionOutcome::PermissionDenied => Some(PERMISSION_DENIED_MESSAGE),
            AcquisitionOutcome::Failed(_) => Some(FETCH_ERROR_MESSAGE),
        }
    }
}

/// Run the acquisition flow once.
///
/// `on_background_denied` fires as soon as a background request comes back
/// denied, before the position sample, so the notice does not wait on it.
pub async fn acquire<F>(
    provider: &dyn GeoProvider,
    platform: Platform,
    mut on_background_denied: F,
) -> AcquisitionOutcome
where
    F: FnMut() + Send,
{
    match locate(provider, platform, &mut on_background_denied).await {
        Ok(Some(coord)) => {
            tracing::info!(
                latitude = coord.latitude,
                longitude = coord.longitude,
                "location acquired"
            );
            AcquisitionOutcome::Located(coord)
        }
        Ok(None) => {
            tracing::warn!("foreground location permission denied");
            AcquisitionOutcome::PermissionDenied
        }
        Err(e) => {
            tracing::error!(error = %e, "location error");
            AcquisitionOutcome::Failed(e.to_string())
        }
    }
}

async fn locate(
    provider: &dyn GeoProvider,
    platform: Platform,
    on_background_denied: &mut (dyn FnMut() + Send),
) -> Result<Option<Coordinate>, LocationError> {
    let status = provider.request_foreground_permission().await?;
    if !status.is_granted() {
        return Ok(None);
    }

    if platform.has_background_tier() {
        let background = provider.request_background_permission().await?;
        if !background.is_granted() {
            tracing::info!(?platform, "background location permission not granted");
            on_background_denied();
        }
    }

    let position = provider.current_position(Accuracy::Balanced).await?;
    // Only the coordinate pair is published, never a provider label.
    Ok(Some(Coordinate::new(position.latitude, position.longitude)))
}
