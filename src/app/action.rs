use crate::app::event::ActivationId;
use crate::search::Suggestion;

#[derive(Debug, PartialEq)]
pub enum Action {
    StartLocationFlow { activation: ActivationId },
    CancelLocationFlow,
    FetchSuggestions { seq: u64, query: String },
    ResolvePlace { pick: u64, suggestion: Suggestion },
    Quit,
}
