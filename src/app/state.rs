use crate::app::action::Action;
use crate::app::event::ActivationId;
use crate::config::AppConfig;
use crate::location::{AcquisitionOutcome, BACKGROUND_NOTICE_BODY, BACKGROUND_NOTICE_TITLE};
use crate::map::Viewport;
use crate::search::SearchBox;
use crate::store::{Coordinate, Store};
use chrono::{DateTime, Local};

/// Dismissible informational dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationStatus {
    Idle,
    Locating,
    Located,
    Unavailable,
}

pub struct AppState {
    pub config: AppConfig,
    pub store: Store,
    pub search: SearchBox,
    pub search_enabled: bool,
    pub viewport: Viewport,
    pub follow_location: bool,
    pub activation: Option<ActivationId>,
    next_activation: ActivationId,
    pub location_status: LocationStatus,
    pub error_message: Option<String>,
    pub located_at: Option<DateTime<Local>>,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig, search_enabled: bool) -> Self {
        let viewport = Viewport::initial(None, &config.map);
        let follow_location = config.map.follow_location;
        Self {
            config,
            store: Store::new(),
            search: SearchBox::new(),
            search_enabled,
            viewport,
            follow_location,
            activation: None,
            next_activation: 0,
            location_status: LocationStatus::Idle,
            error_message: None,
            located_at: None,
            notice: None,
            should_quit: false,
            dirty: true,
        }
    }

    /// Begin a new activation of the screen. The location flow runs once per
    /// activation.
    pub fn activate(&mut self) -> Action {
        let activation = self.next_activation;
        self.next_activation += 1;
        self.activation = Some(activation);
        self.location_status = LocationStatus::Locating;
        self.error_message = None;
        self.dirty = true;
        tracing::info!(activation, "screen activated");
        Action::StartLocationFlow { activation }
    }

    /// End the current activation. Anything its flow reports afterwards is
    /// ignored.
    pub fn deactivate(&mut self) -> Option<Action> {
        let activation = self.activation.take()?;
        if self.location_status == LocationStatus::Locating {
            self.location_status = LocationStatus::Idle;
        }
        self.dirty = true;
        tracing::info!(activation, "screen deactivated");
        Some(Action::CancelLocationFlow)
    }

    pub fn is_active(&self, activation: ActivationId) -> bool {
        self.activation == Some(activation)
    }

    /// Apply the result of a location flow. Returns false for stale results.
    pub fn apply_location(&mut self, activation: ActivationId, outcome: AcquisitionOutcome) -> bool {
        if !self.is_active(activation) {
            tracing::debug!(activation, "dropping location result of inactive screen");
            return false;
        }
        match outcome {
            AcquisitionOutcome::Located(coord) => {
                if self.follow_location {
                    self.viewport.recenter(&coord);
                }
                self.store.set_current_location(coord);
                self.located_at = Some(Local::now());
                self.location_status = LocationStatus::Located;
                self.error_message = None;
            }
            other => {
                if let AcquisitionOutcome::Failed(ref detail) = other {
                    tracing::warn!(activation, error = %detail, "no location fix");
                }
                self.error_message = other.error_message().map(str::to_string);
                self.location_status = LocationStatus::Unavailable;
            }
        }
        self.dirty = true;
        true
    }

    pub fn show_background_notice(&mut self, activation: ActivationId) -> bool {
        if !self.is_active(activation) {
            return false;
        }
        self.notice = Some(Notice {
            title: BACKGROUND_NOTICE_TITLE.to_string(),
            body: BACKGROUND_NOTICE_BODY.to_string(),
        });
        self.dirty = true;
        true
    }

    pub fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.dirty = true;
        }
    }

    /// Apply the details lookup of a picked suggestion.
    pub fn apply_place(&mut self, pick: u64, result: Result<Coordinate, String>) -> bool {
        if !self.search.finish_pick(pick) {
            return false;
        }
        match result {
            Ok(coord) => {
                self.viewport.recenter(&coord);
                self.follow_location = false;
                self.store.set_search_location(coord);
            }
            Err(e) => {
                tracing::warn!(error = %e, "place details lookup failed");
                self.search.error = Some(e);
            }
        }
        self.dirty = true;
        true
    }

    pub fn recenter_on_current(&mut self) {
        if let Some(current) = self.store.current_location().cloned() {
            self.viewport.recenter(&current);
            self.follow_location = true;
            self.dirty = true;
        }
    }

    /// The user moved the map; stop following the device.
    pub fn detach_viewport(&mut self) {
        self.follow_location = false;
        self.dirty = true;
    }

    pub fn status_line(&self) -> String {
        let mut s = match self.location_status {
            LocationStatus::Idle => "Location: idle".to_string(),
            LocationStatus::Locating => "Locating...".to_string(),
            LocationStatus::Located => match (self.store.current_location(), self.located_at) {
                (Some(c), Some(at)) => format!("You: {} ({})", c.short_label(), at.format("%H:%M:%S")),
                (Some(c), None) => format!("You: {}", c.short_label()),
                _ => "Location: unknown".to_string(),
            },
            LocationStatus::Unavailable => "Location unavailable".to_string(),
        };
        if let Some(ref err) = self.error_message {
            s.push_str(&format!(" | {}", err));
        }
        if let Some(found) = self.store.search_location() {
            let label = found
                .description
                .clone()
                .unwrap_or_else(|| found.short_label());
            s.push_str(&format!(" | Found: {}", label));
        }
        if !self.search_enabled {
            s.push_str(" | search disabled: no API key");
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{FETCH_ERROR_MESSAGE, PERMISSION_DENIED_MESSAGE};

    fn state() -> AppState {
        AppState::new(AppConfig::default(), true)
    }

    #[test]
    fn test_activation_ids_increase() {
        let mut s = state();
        assert_eq!(s.activate(), Action::StartLocationFlow { activation: 0 });
        assert_eq!(s.deactivate(), Some(Action::CancelLocationFlow));
        assert_eq!(s.deactivate(), None);
        assert_eq!(s.activate(), Action::StartLocationFlow { activation: 1 });
        assert!(s.is_active(1));
        assert!(!s.is_active(0));
    }

    #[test]
    fn test_located_updates_store_and_viewport() {
        let mut s = state();
        s.activate();
        assert!(s.apply_location(0, AcquisitionOutcome::Located(Coordinate::new(10.0, 20.0))));
        assert_eq!(s.store.current_location(), Some(&Coordinate::new(10.0, 20.0)));
        assert_eq!(s.viewport.center, Coordinate::new(10.0, 20.0));
        assert_eq!(s.location_status, LocationStatus::Located);
        assert!(s.status_line().starts_with("You: 10.00000, 20.00000"));
    }

    #[test]
    fn test_denied_sets_error_only() {
        let mut s = state();
        s.activate();
        s.apply_location(0, AcquisitionOutcome::PermissionDenied);
        assert_eq!(s.store.current_location(), None);
        assert_eq!(s.error_message.as_deref(), Some(PERMISSION_DENIED_MESSAGE));
        assert!(s.status_line().contains(PERMISSION_DENIED_MESSAGE));
    }

    #[test]
    fn test_failure_keeps_previous_location() {
        let mut s = state();
        s.activate();
        s.apply_location(0, AcquisitionOutcome::Located(Coordinate::new(10.0, 20.0)));
        s.deactivate();
        s.activate();
        s.apply_location(1, AcquisitionOutcome::Failed("timeout".into()));
        assert_eq!(s.store.current_location(), Some(&Coordinate::new(10.0, 20.0)));
        assert_eq!(s.error_message.as_deref(), Some(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn test_stale_results_are_ignored() {
        let mut s = state();
        s.activate();
        s.deactivate();
        assert!(!s.apply_location(0, AcquisitionOutcome::Located(Coordinate::new(10.0, 20.0))));
        assert!(!s.show_background_notice(0));
        assert_eq!(s.store.current_location(), None);
        assert_eq!(s.store.revision(), 0);
        assert!(s.notice.is_none());
    }

    #[test]
    fn test_viewport_stays_when_detached() {
        let mut s = state();
        s.detach_viewport();
        s.activate();
        s.apply_location(0, AcquisitionOutcome::Located(Coordinate::new(10.0, 20.0)));
        assert_eq!(s.viewport.center, Coordinate::new(37.78825, -122.4324));

        s.recenter_on_current();
        assert_eq!(s.viewport.center, Coordinate::new(10.0, 20.0));
        assert!(s.follow_location);
    }

    #[test]
    fn test_notice_dismiss() {
        let mut s = state();
        s.activate();
        assert!(s.show_background_notice(0));
        assert_eq!(s.notice.as_ref().unwrap().title, BACKGROUND_NOTICE_TITLE);
        s.dismiss_notice();
        assert!(s.notice.is_none());
    }

    #[test]
    fn test_status_mentions_disabled_search() {
        let s = AppState::new(AppConfig::default(), false);
        assert!(s.status_line().ends_with("search disabled: no API key"));
    }
}
