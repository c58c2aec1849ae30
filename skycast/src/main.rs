//! skycast - terminal weather lookup
//!
//! # Usage
//!
//! ```sh
//! # Start on the welcome screen
//! skycast
//!
//! # Search immediately against a local backend
//! skycast --endpoint http://127.0.0.1:5000/weather --city London
//! ```

use std::cell::RefCell;
use std::io;
use std::sync::Arc;

use chrono::Timelike;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use skycast::action::Action;
use skycast::api::WeatherClient;
use skycast::components::{AppView, AppViewProps, Component};
use skycast::config::Args;
use skycast::effect::Effect;
use skycast::error::Result;
use skycast::event::EventKind;
use skycast::logging;
use skycast::reducer::reducer;
use skycast::runtime::{EffectContext, EventOutcome, PollerConfig, Runtime};
use skycast::state::AppState;
use skycast::store::{ActionLogger, Store};
use skycast::tasks::TaskKey;

const SEARCH_TASK: &str = "search";
const TICK_TASK: &str = "tick";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(args.log_dir.as_deref())?;

    let client = Arc::new(WeatherClient::new(&args.client_config())?);
    info!(endpoint = client.endpoint(), "Weather client ready");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &args, client).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        warn!(error = %err, "Exited with error");
    }
    result.map_err(Into::into)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    args: &Args,
    client: Arc<WeatherClient>,
) -> io::Result<()> {
    let state = AppState::new(args.rng(), args.icon_host.clone(), args.tick_interval());
    let store = Store::with_middleware(state, reducer, ActionLogger::new().quiet("Tick"));
    let mut runtime = Runtime::from_store(store).with_event_poller(PollerConfig::default());

    runtime
        .tasks()
        .interval(TICK_TASK, args.tick_interval(), || Action::Tick);

    if let Some(city) = args.initial_city() {
        runtime.enqueue(Action::SearchInputChange(city.to_string()));
        runtime.enqueue(Action::SearchSubmit);
    }

    let ui = RefCell::new(AppView::new());

    runtime
        .run(
            terminal,
            |frame, area, state| {
                ui.borrow_mut().render(frame, area, AppViewProps { state });
            },
            |event, state| {
                let outcome = EventOutcome::from_actions(
                    ui.borrow_mut().handle_event(event, AppViewProps { state }),
                );
                match event {
                    EventKind::Resize(..) => outcome.with_render(),
                    EventKind::Key(_) => outcome,
                }
            },
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(&client, effect, ctx),
        )
        .await
}

/// Run an effect; completions come back as actions.
fn handle_effect(client: &Arc<WeatherClient>, effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::Search { city, generation } => {
            info!(%city, generation, "Searching");
            let client = Arc::clone(client);
            ctx.tasks().spawn(SEARCH_TASK, async move {
                match client.search(&city).await {
                    Ok(weather) => Action::SearchDidLoad {
                        generation,
                        weather,
                        hour: chrono::Local::now().hour(),
                    },
                    Err(err) => {
                        warn!(%city, error = %err, "Search failed");
                        Action::SearchDidError {
                            generation,
                            message: err.user_message(),
                        }
                    }
                }
            });
        }
        Effect::CancelSearch => {
            ctx.tasks().cancel(&TaskKey::new(SEARCH_TASK));
        }
    }
}
