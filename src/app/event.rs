use crate::location::AcquisitionOutcome;
use crate::search::Suggestion;
use crate::store::Coordinate;
use crossterm::event::Event as CrosstermEvent;

/// Identifies one activation of the map screen.
pub type ActivationId = u64;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Location flow finished for the given activation
    LocationAcquired {
        activation: ActivationId,
        outcome: AcquisitionOutcome,
    },
    /// Background permission was refused; informational only
    BackgroundPermissionDenied {
        activation: ActivationId,
    },

    /// Place search results
    SuggestionsLoaded {
        seq: u64,
        result: Result<Vec<Suggestion>, String>,
    },
    PlaceResolved {
        pick: u64,
        result: Result<Coordinate, String>,
    },

    /// Tick for UI refresh
    Tick,
}
