//! Map viewport and markers.
//!
//! A viewport is a center plus the latitude/longitude span shown, the same
//! shape native map widgets call a "region". Bounds are center ± span/2.

use crate::config::MapConfig;
use crate::store::{Coordinate, LocationState};
use ratatui::style::Color;

pub const CURRENT_LOCATION_TITLE: &str = "Current Location";
pub const SEARCH_LOCATION_TITLE: &str = "Search Location";
pub const CURRENT_LOCATION_COLOR: Color = Color::Blue;
pub const SEARCH_LOCATION_COLOR: Color = Color::Green;

const MIN_LATITUDE_DELTA: f64 = 0.0005;
const MAX_LATITUDE_DELTA: f64 = 180.0;
const MIN_LONGITUDE_DELTA: f64 = 0.0005;
const MAX_LONGITUDE_DELTA: f64 = 360.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Viewport {
    /// Region shown before the user moves the map: the current location when
    /// known, otherwise the configured center.
    pub fn initial(current: Option<&Coordinate>, config: &MapConfig) -> Self {
        let center = match current {
            Some(c) => Coordinate::new(c.latitude, c.longitude),
            None => Coordinate::new(config.center_latitude, config.center_longitude),
        };
        Self {
            center,
            latitude_delta: config.latitude_delta.clamp(MIN_LATITUDE_DELTA, MAX_LATITUDE_DELTA),
            longitude_delta: config
                .longitude_delta
                .clamp(MIN_LONGITUDE_DELTA, MAX_LONGITUDE_DELTA),
        }
    }

    pub fn recenter(&mut self, coord: &Coordinate) {
        self.center = Coordinate::new(coord.latitude.clamp(-90.0, 90.0), wrap_longitude(coord.longitude));
    }

    pub fn zoom_in(&mut self) {
        self.scale(0.5);
    }

    pub fn zoom_out(&mut self) {
        self.scale(2.0);
    }

    fn scale(&mut self, factor: f64) {
        self.latitude_delta = (self.latitude_delta * factor).clamp(MIN_LATITUDE_DELTA, MAX_LATITUDE_DELTA);
        self.longitude_delta =
            (self.longitude_delta * factor).clamp(MIN_LONGITUDE_DELTA, MAX_LONGITUDE_DELTA);
    }

    /// Move by a fraction of the visible span; positive is north/east.
    pub fn pan(&mut self, north: f64, east: f64) {
        let lat = (self.center.latitude + north * self.latitude_delta).clamp(-90.0, 90.0);
        let lon = wrap_longitude(self.center.longitude + east * self.longitude_delta);
        self.center = Coordinate::new(lat, lon);
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.longitude_delta / 2.0;
        [self.center.longitude - half, self.center.longitude + half]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.latitude_delta / 2.0;
        [self.center.latitude - half, self.center.latitude + half]
    }

    /// Longitude of `lon` on the canvas: the copy of it closest to the
    /// center, so points across the antimeridian land inside `x_bounds`.
    pub fn canvas_longitude(&self, lon: f64) -> f64 {
        self.center.longitude + wrap_longitude(lon - self.center.longitude)
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        let [south, north] = self.y_bounds();
        let offset = wrap_longitude(coord.longitude - self.center.longitude);
        (south..=north).contains(&coord.latitude) && offset.abs() <= self.longitude_delta / 2.0
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // Keep the antimeridian on the east edge.
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub title: String,
    pub color: Color,
}

/// Markers for whatever the store currently holds.
pub fn markers(state: &LocationState) -> Vec<Marker> {
    let mut out = Vec::with_capacity(2);
    if let Some(current) = &state.current_location {
        out.push(Marker {
            coordinate: current.clone(),
            title: CURRENT_LOCATION_TITLE.to_string(),
            color: CURRENT_LOCATION_COLOR,
        });
    }
    if let Some(search) = &state.search_location {
        let title = search
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| SEARCH_LOCATION_TITLE.to_string());
        out.push(Marker {
            coordinate: search.clone(),
            title,
            color: SEARCH_LOCATION_COLOR,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_region_defaults() {
        let vp = Viewport::initial(None, &MapConfig::default());
        assert_eq!(vp.center, Coordinate::new(37.78825, -122.4324));
        assert_eq!(vp.latitude_delta, 0.0922);
        assert_eq!(vp.longitude_delta, 0.0421);
    }

    #[test]
    fn test_initial_region_follows_current() {
        let current = Coordinate::new(10.0, 20.0).with_description("ignored");
        let vp = Viewport::initial(Some(&current), &MapConfig::default());
        assert_eq!(vp.center, Coordinate::new(10.0, 20.0));
        assert!(vp.contains(&current));
    }

    #[test]
    fn test_bounds_and_contains() {
        let mut vp = Viewport::initial(Some(&Coordinate::new(0.0, 0.0)), &MapConfig::default());
        vp.latitude_delta = 2.0;
        vp.longitude_delta = 4.0;
        assert_eq!(vp.x_bounds(), [-2.0, 2.0]);
        assert_eq!(vp.y_bounds(), [-1.0, 1.0]);
        assert!(vp.contains(&Coordinate::new(0.5, -1.5)));
        assert!(!vp.contains(&Coordinate::new(1.5, 0.0)));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = Viewport::initial(None, &MapConfig::default());
        vp.zoom_in();
        assert_eq!(vp.latitude_delta, 0.0461);
        for _ in 0..40 {
            vp.zoom_out();
        }
        assert_eq!(vp.latitude_delta, MAX_LATITUDE_DELTA);
        assert_eq!(vp.longitude_delta, MAX_LONGITUDE_DELTA);
        for _ in 0..60 {
            vp.zoom_in();
        }
        assert_eq!(vp.latitude_delta, MIN_LATITUDE_DELTA);
    }

    #[test]
    fn test_pan_wraps_longitude_and_clamps_latitude() {
        let mut vp = Viewport::initial(Some(&Coordinate::new(89.0, 179.0)), &MapConfig::default());
        vp.latitude_delta = 10.0;
        vp.longitude_delta = 10.0;
        vp.pan(1.0, 0.5);
        assert_eq!(vp.center.latitude, 90.0);
        assert!((vp.center.longitude - -176.0).abs() < 1e-9);
    }

    #[test]
    fn test_contains_across_antimeridian() {
        let mut vp = Viewport::initial(Some(&Coordinate::new(0.0, 179.0)), &MapConfig::default());
        vp.latitude_delta = 10.0;
        vp.longitude_delta = 10.0;
        assert_eq!(vp.x_bounds(), [174.0, 184.0]);
        assert!(vp.contains(&Coordinate::new(0.0, -178.0)));
        assert!((vp.canvas_longitude(-178.0) - 182.0).abs() < 1e-9);
        assert!(!vp.contains(&Coordinate::new(0.0, -170.0)));

        vp.pan(0.0, 0.5);
        assert!((vp.center.longitude - -176.0).abs() < 1e-9);
        assert!(vp.contains(&Coordinate::new(0.0, 178.0)));
        assert!((vp.canvas_longitude(178.0) - -182.0).abs() < 1e-9);
        let [west, east] = vp.x_bounds();
        assert!((west..=east).contains(&vp.canvas_longitude(178.0)));
        assert!(!vp.contains(&Coordinate::new(0.0, 170.0)));
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(-180.0), -180.0);
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-540.0), -180.0);
    }

    #[test]
    fn test_markers_for_state() {
        let state = LocationState {
            current_location: Some(Coordinate::new(10.0, 20.0)),
            search_location: Some(Coordinate::new(1.5, 2.5).with_description("Cafe")),
        };
        let markers = markers(&state);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].coordinate, Coordinate::new(10.0, 20.0));
        assert_eq!(markers[0].title, CURRENT_LOCATION_TITLE);
        assert_eq!(markers[0].color, Color::Blue);
        assert_eq!(markers[1].title, "Cafe");
        assert_eq!(markers[1].color, Color::Green);
    }

    #[test]
    fn test_search_marker_default_title() {
        let state = LocationState {
            current_location: None,
            search_location: Some(Coordinate::new(1.5, 2.5)),
        };
        let markers = markers(&state);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].title, SEARCH_LOCATION_TITLE);
    }

    #[test]
    fn test_no_markers_when_empty() {
        assert!(markers(&LocationState::default()).is_empty());
    }
}
