mod app;
mod config;
mod location;
mod logging;
mod map;
mod search;
mod store;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::location::session::LocationTask;
use crate::location::{GeoProvider, Platform};
use crate::search::PlaceSearch;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config
    let cfg = config::load_config()?;
    if let Some(path) = logging::init(&cfg.logging)? {
        tracing::info!(path = %path.display(), "pinpoint starting");
    }

    let provider = location::provider::build_provider(&cfg.location)?;
    let places = search::build_search(&cfg.search)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg, provider, places).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "pinpoint exited with error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Runs the async side of actions and owns the in-flight location task.
struct Executor {
    provider: Arc<dyn GeoProvider>,
    platform: Platform,
    places: Option<Arc<dyn PlaceSearch>>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    location_task: Option<LocationTask>,
}

impl Executor {
    fn execute(&mut self, state: &mut AppState, action: Action) {
        match action {
            Action::StartLocationFlow { activation } => {
                let task = LocationTask::spawn(
                    activation,
                    self.provider.clone(),
                    self.platform,
                    self.event_tx.clone(),
                );
                // Replacing the handle aborts any previous flow.
                if let Some(old) = self.location_task.replace(task) {
                    tracing::debug!(activation = old.activation(), "replaced location flow");
                }
            }
            Action::CancelLocationFlow => {
                if let Some(task) = self.location_task.take() {
                    task.cancel();
                }
            }
            Action::FetchSuggestions { seq, query } => {
                let Some(places) = self.places.clone() else {
                    return;
                };
                let tx = self.event_tx.clone();
                tokio::spawn(async move {
                    let result = places.autocomplete(&query).await.map_err(|e| e.to_string());
                    let _ = tx.send(AppEvent::SuggestionsLoaded { seq, result });
                });
            }
            Action::ResolvePlace { pick, suggestion } => {
                let Some(places) = self.places.clone() else {
                    return;
                };
                let tx = self.event_tx.clone();
                tokio::spawn(async move {
                    let result = places.details(&suggestion).await.map_err(|e| e.to_string());
                    let _ = tx.send(AppEvent::PlaceResolved { pick, result });
                });
            }
            Action::Quit => {
                state.should_quit = true;
            }
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
    provider: Arc<dyn GeoProvider>,
    places: Option<Arc<dyn PlaceSearch>>,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let platform = cfg.location.platform();
    let mut state = AppState::new(cfg, places.is_some());
    let mut executor = Executor {
        provider,
        platform,
        places,
        event_tx: event_tx.clone(),
        location_task: None,
    };

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // The screen becomes active: the location flow starts once
    let start = state.activate();
    executor.execute(&mut state, start);

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;
    state.dirty = false;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let revision = state.store.revision();
        let actions = handler::handle_event(&mut state, event);
        for action in actions {
            executor.execute(&mut state, action);
        }
        if state.store.revision() != revision {
            state.dirty = true;
        }

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    // Leaving the screen: nothing may write the store after this point
    if let Some(action) = state.deactivate() {
        executor.execute(&mut state, action);
    }
    tracing::info!("pinpoint stopped");

    Ok(())
}
