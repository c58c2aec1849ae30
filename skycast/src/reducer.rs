//! Reducer - `(state, action) -> (state, effects)`
//!
//! All transitions between screens happen here. The reducer never performs
//! I/O and never reads the clock; the search task reports the local hour with
//! its completion.

use tracing::{debug, warn};

use crate::action::Action;
use crate::api::validate_city;
use crate::effect::Effect;
use crate::state::{AppState, Focus};
use crate::store::DispatchResult;
use crate::view::{ShowScreen, ViewState};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search =====
        Action::SearchInputChange(text) => {
            if state.query == text {
                return DispatchResult::unchanged();
            }
            state.query = text;
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search_generation += 1;
            let generation = state.search_generation;

            match validate_city(&state.query) {
                Ok(city) => {
                    state.view.show(ShowScreen::Loading);
                    state.focus = Focus::SearchBar;
                    DispatchResult::changed_with(Effect::Search { city, generation })
                }
                Err(err) => {
                    debug!(generation, "Rejected empty search");
                    show_error(state, err.user_message());
                    // an older lookup must not replace this error
                    DispatchResult::changed_with(Effect::CancelSearch)
                }
            }
        }

        Action::SearchDidLoad {
            generation,
            weather,
            hour,
        } => {
            if is_stale(state, generation) {
                return DispatchResult::unchanged();
            }
            debug!(
                location = %weather.location(),
                icon = %weather.icon_url(&state.icon_host),
                hour,
                "Showing result"
            );
            state.view.show(ShowScreen::Result { weather, hour });
            DispatchResult::changed()
        }

        Action::SearchDidError {
            generation,
            message,
        } => {
            if is_stale(state, generation) {
                return DispatchResult::unchanged();
            }
            show_error(state, message);
            DispatchResult::changed()
        }

        // ===== Error screen =====
        Action::ErrorRetry => {
            state.view.try_again();
            state.focus = Focus::SearchBar;
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::FocusToggle => {
            // the button only exists on the Error screen
            if !state.view.is_visible(ViewState::Error) && state.focus == Focus::SearchBar {
                return DispatchResult::unchanged();
            }
            state.focus = if state.view.is_visible(ViewState::Error) {
                state.focus.toggle()
            } else {
                Focus::SearchBar
            };
            DispatchResult::changed()
        }

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            let animated = state.view.tick(state.tick_interval);
            if animated || state.is_loading() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // handled by the runtime
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn show_error(state: &mut AppState, message: String) {
    state.view.show(ShowScreen::Error(message));
    state.focus = Focus::TryAgain;
}

fn is_stale(state: &AppState, generation: u64) -> bool {
    if generation == state.search_generation {
        return false;
    }
    warn!(
        generation,
        current = state.search_generation,
        "Ignoring stale search completion"
    );
    true
}
