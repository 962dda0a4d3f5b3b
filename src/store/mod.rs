//! Shared location store.
//!
//! Holds the two coordinate slots the screen renders as markers. State
//! transitions are pure functions (`reduce`), so the store can be exercised
//! without a terminal. [`Store`] owns the current value and counts dispatches
//! so the UI knows when something changed.

/// A latitude/longitude pair with an optional label.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `47.37690, 8.54170` style label, used when no description exists.
    pub fn short_label(&self) -> String {
        format!("{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationState {
    pub current_location: Option<Coordinate>,
    pub search_location: Option<Coordinate>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationAction {
    SetCurrentLocation(Coordinate),
    SetSearchLocation(Coordinate),
}

pub fn reduce(state: LocationState, action: LocationAction) -> LocationState {
    match action {
        LocationAction::SetCurrentLocation(coord) => set_current_location(state, coord),
        LocationAction::SetSearchLocation(coord) => set_search_location(state, coord),
    }
}

/// Replace the current-location slot.
pub fn set_current_location(state: LocationState, coord: Coordinate) -> LocationState {
    LocationState {
        current_location: Some(coord),
        ..state
    }
}

/// Replace the search-location slot. The previous value is dropped, never merged.
pub fn set_search_location(state: LocationState, coord: Coordinate) -> LocationState {
    LocationState {
        search_location: Some(coord),
        ..state
    }
}

#[derive(Debug, Default)]
pub struct Store {
    state: LocationState,
    revision: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LocationState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, action: LocationAction) {
        tracing::debug!(?action, "store dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn set_current_location(&mut self, coord: Coordinate) {
        self.dispatch(LocationAction::SetCurrentLocation(coord));
    }

    pub fn set_search_location(&mut self, coord: Coordinate) {
        self.dispatch(LocationAction::SetSearchLocation(coord));
    }

    pub fn current_location(&self) -> Option<&Coordinate> {
        self.state.current_location.as_ref()
    }

    pub fn search_location(&self) -> Option<&Coordinate> {
        self.state.search_location.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_empty() {
        let store = Store::new();
        assert_eq!(store.current_location(), None);
        assert_eq!(store.search_location(), None);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_set_current_location_replaces_slot() {
        let state = set_current_location(LocationState::default(), Coordinate::new(10.0, 20.0));
        assert_eq!(state.current_location, Some(Coordinate::new(10.0, 20.0)));
        assert_eq!(state.search_location, None);

        let state = set_current_location(state, Coordinate::new(-3.0, 4.0));
        assert_eq!(state.current_location, Some(Coordinate::new(-3.0, 4.0)));
    }

    #[test]
    fn test_set_search_location_keeps_only_last_payload() {
        let first = Coordinate::new(1.5, 2.5).with_description("Cafe");
        let second = Coordinate::new(48.8584, 2.2945);

        let state = set_search_location(LocationState::default(), first);
        let state = set_search_location(state, second.clone());

        // Replace, not merge: the old description must not survive.
        assert_eq!(state.search_location, Some(second));
    }

    #[test]
    fn test_slots_are_independent() {
        let state = LocationState::default();
        let state = reduce(state, LocationAction::SetCurrentLocation(Coordinate::new(10.0, 20.0)));
        let state = reduce(
            state,
            LocationAction::SetSearchLocation(Coordinate::new(1.5, 2.5).with_description("Cafe")),
        );
        assert_eq!(state.current_location, Some(Coordinate::new(10.0, 20.0)));
        assert_eq!(
            state.search_location,
            Some(Coordinate {
                latitude: 1.5,
                longitude: 2.5,
                description: Some("Cafe".into()),
            })
        );
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let action = LocationAction::SetSearchLocation(Coordinate::new(1.5, 2.5).with_description("Cafe"));
        let once = reduce(LocationState::default(), action.clone());
        let twice = reduce(once.clone(), action);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_store_dispatch_bumps_revision() {
        let mut store = Store::new();
        store.set_current_location(Coordinate::new(10.0, 20.0));
        store.set_search_location(Coordinate::new(1.5, 2.5));
        assert_eq!(store.revision(), 2);
        assert_eq!(store.current_location(), Some(&Coordinate::new(10.0, 20.0)));
        assert_eq!(store.state().search_location, Some(Coordinate::new(1.5, 2.5)));
    }
}
