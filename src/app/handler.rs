use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Fraction of the visible span moved per pan keystroke.
const PAN_STEP: f64 = 0.25;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::LocationAcquired {
            activation,
            outcome,
        } => {
            state.apply_location(activation, outcome);
            vec![]
        }
        AppEvent::BackgroundPermissionDenied { activation } => {
            state.show_background_notice(activation);
            vec![]
        }
        AppEvent::SuggestionsLoaded { seq, result } => {
            if let Err(ref e) = result {
                tracing::warn!(error = %e, "autocomplete failed");
            }
            if state.search.apply_suggestions(seq, result) {
                state.dirty = true;
            }
            vec![]
        }
        AppEvent::PlaceResolved { pick, result } => {
            state.apply_place(pick, result);
            vec![]
        }
        AppEvent::Tick => handle_tick(state),
    }
}

fn handle_tick(state: &mut AppState) -> Vec<Action> {
    if !state.search_enabled {
        return vec![];
    }

    let debounce = Duration::from_millis(state.config.search.debounce_ms);
    let min_len = state.config.search.min_query_len;
    let was_open = state.search.is_open();
    match state.search.take_due_query(Instant::now(), debounce, min_len) {
        Some((seq, query)) => {
            state.dirty = true;
            vec![Action::FetchSuggestions { seq, query }]
        }
        None => {
            if was_open != state.search.is_open() {
                state.dirty = true;
            }
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global keybindings
    if ctrl && key.code == KeyCode::Char('c') {
        let mut actions: Vec<Action> = state.deactivate().into_iter().collect();
        actions.push(Action::Quit);
        return actions;
    }

    // The notice is modal until dismissed
    if state.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.dismiss_notice();
        }
        return vec![];
    }

    if ctrl {
        return handle_map_key(state, key.code);
    }

    match key.code {
        KeyCode::PageUp => {
            state.viewport.zoom_in();
            state.detach_viewport();
        }
        KeyCode::PageDown => {
            state.viewport.zoom_out();
            state.detach_viewport();
        }
        KeyCode::F(5) => state.recenter_on_current(),
        _ => return handle_search_key(state, key),
    }
    vec![]
}

fn handle_map_key(state: &mut AppState, code: KeyCode) -> Vec<Action> {
    match code {
        KeyCode::Char('r') => {
            // Restart the screen: the old flow is cancelled, a fresh one runs.
            let mut actions: Vec<Action> = state.deactivate().into_iter().collect();
            actions.push(state.activate());
            return actions;
        }
        KeyCode::Up => state.viewport.pan(PAN_STEP, 0.0),
        KeyCode::Down => state.viewport.pan(-PAN_STEP, 0.0),
        KeyCode::Left => state.viewport.pan(0.0, -PAN_STEP),
        KeyCode::Right => state.viewport.pan(0.0, PAN_STEP),
        KeyCode::Char('u') => {
            state.search.clear();
            return vec![];
        }
        _ => return vec![],
    }
    state.detach_viewport();
    vec![]
}

fn handle_search_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let search = &mut state.search;
    match key.code {
        KeyCode::Enter => {
            if let Some((pick, suggestion)) = search.pick() {
                tracing::info!(place = %suggestion.description, "place picked");
                return vec![Action::ResolvePlace { pick, suggestion }];
            }
        }
        KeyCode::Esc => {
            if search.is_open() {
                search.dismiss();
            } else {
                search.clear();
            }
        }
        KeyCode::Up => search.select_prev(),
        KeyCode::Down | KeyCode::Tab => search.select_next(),
        KeyCode::Backspace => search.delete_back(),
        KeyCode::Delete => search.delete_forward(),
        KeyCode::Left => search.move_left(),
        KeyCode::Right => search.move_right(),
        KeyCode::Home => search.move_home(),
        KeyCode::End => search.move_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => search.insert_char(c),
        _ => {}
    }
    vec![]
}
