//! View-state controller
//!
//! Exactly one of the four screens is visible at a time. The visible screen
//! carries its own payload, so an error message or a themed result cannot
//! outlive the screen that shows it.

use std::time::Duration;

use rand::rngs::StdRng;
use tracing::debug;

use crate::particles::Scene;
use crate::state::WeatherResult;
use crate::theme::{self, Theme};

/// Which screen is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewState {
    Welcome,
    Loading,
    Error,
    Result,
}

impl ViewState {
    pub const ALL: [ViewState; 4] = [
        ViewState::Welcome,
        ViewState::Loading,
        ViewState::Error,
        ViewState::Result,
    ];
}

/// The visible screen with its payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Welcome,
    Loading,
    Error { message: String },
    Result { weather: WeatherResult, theme: Theme },
}

impl Screen {
    pub fn view_state(&self) -> ViewState {
        match self {
            Screen::Welcome => ViewState::Welcome,
            Screen::Loading => ViewState::Loading,
            Screen::Error { .. } => ViewState::Error,
            Screen::Result { .. } => ViewState::Result,
        }
    }
}

/// Transition request. Error and Result cannot be shown without a payload.
#[derive(Clone, Debug, PartialEq)]
pub enum ShowScreen {
    Welcome,
    Loading,
    Error(String),
    Result { weather: WeatherResult, hour: u32 },
}

#[derive(Debug, Clone)]
pub struct ViewController {
    screen: Screen,
    scene: Scene,
    rng: StdRng,
}

impl ViewController {
    /// Starts on the Welcome screen.
    pub fn new(rng: StdRng) -> Self {
        Self {
            screen: Screen::Welcome,
            scene: Scene::new(),
            rng,
        }
    }

    /// Hide the current screen and show `target`.
    ///
    /// A result is themed first: the scene drops its previous effects and
    /// receives the new background and particles before the card appears.
    /// Other screens leave the scene as it is.
    pub fn show(&mut self, target: ShowScreen) {
        let next = match target {
            ShowScreen::Welcome => Screen::Welcome,
            ShowScreen::Loading => Screen::Loading,
            ShowScreen::Error(message) => Screen::Error { message },
            ShowScreen::Result { weather, hour } => {
                let theme = theme::map(weather.temperature, &weather.description, hour);
                self.scene.apply_theme(&theme, &mut self.rng);
                Screen::Result { weather, theme }
            }
        };
        debug!(
            from = ?self.screen.view_state(),
            to = ?next.view_state(),
            "Screen transition"
        );
        self.screen = next;
    }

    /// "Try again" always lands on Welcome, discarding any error.
    pub fn try_again(&mut self) {
        self.show(ShowScreen::Welcome);
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn active(&self) -> ViewState {
        self.screen.view_state()
    }

    pub fn is_visible(&self, view: ViewState) -> bool {
        self.active() == view
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Advance the scene clock; returns whether anything on screen moves.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.scene.is_animated() {
            self.scene.advance(dt);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{ParticleKind, particle_rng};
    use crate::theme::Background;

    fn weather(description: &str, temperature: f64) -> WeatherResult {
        WeatherResult {
            city: "Oslo".into(),
            country: "NO".into(),
            temperature,
            description: description.into(),
            icon_code: "10d".into(),
            feels_like: temperature - 1.0,
            humidity: 80.0,
            wind_speed: 3.6,
            pressure: 1012.0,
            last_updated: "2024-01-01 12:00:00".into(),
        }
    }

    fn controller() -> ViewController {
        ViewController::new(particle_rng(Some(11)))
    }

    fn visible_count(view: &ViewController) -> usize {
        ViewState::ALL
            .iter()
            .filter(|v| view.is_visible(**v))
            .count()
    }

    #[test]
    fn test_starts_on_welcome() {
        let view = controller();
        assert_eq!(view.active(), ViewState::Welcome);
        assert_eq!(visible_count(&view), 1);
    }

    #[test]
    fn test_exactly_one_visible_after_each_transition() {
        let mut view = controller();
        let targets = [
            ShowScreen::Loading,
            ShowScreen::Error("boom".into()),
            ShowScreen::Welcome,
            ShowScreen::Result {
                weather: weather("light rain", 15.0),
                hour: 12,
            },
        ];
        for target in targets {
            view.show(target);
            assert_eq!(visible_count(&view), 1);
        }
        assert_eq!(view.active(), ViewState::Result);
    }

    #[test]
    fn test_error_message_verbatim() {
        let mut view = controller();
        view.show(ShowScreen::Error("City not found".into()));
        assert_eq!(
            view.screen(),
            &Screen::Error {
                message: "City not found".into()
            }
        );
    }

    #[test]
    fn test_try_again_from_any_screen() {
        let mut view = controller();
        view.show(ShowScreen::Error("x".into()));
        view.try_again();
        assert_eq!(view.screen(), &Screen::Welcome);

        view.show(ShowScreen::Loading);
        view.try_again();
        assert_eq!(view.active(), ViewState::Welcome);
    }

    #[test]
    fn test_result_themes_scene() {
        let mut view = controller();
        view.show(ShowScreen::Result {
            weather: weather("light rain", 15.0),
            hour: 12,
        });

        let Screen::Result { theme, .. } = view.screen() else {
            panic!("expected result screen");
        };
        assert_eq!(theme.particle, ParticleKind::Rain);
        assert_eq!(view.scene().background(), Some(Background::Rainy));
        assert_eq!(
            view.scene().overlay().map(|o| o.kind),
            Some(ParticleKind::Rain)
        );
    }

    #[test]
    fn test_new_result_replaces_overlay() {
        let mut view = controller();
        view.show(ShowScreen::Result {
            weather: weather("light rain", 15.0),
            hour: 12,
        });
        view.show(ShowScreen::Result {
            weather: weather("overcast clouds", 15.0),
            hour: 12,
        });
        assert!(view.scene().overlay().is_none());
    }

    #[test]
    fn test_overlay_persists_through_welcome_and_error() {
        let mut view = controller();
        view.show(ShowScreen::Result {
            weather: weather("snow", -2.0),
            hour: 12,
        });
        view.show(ShowScreen::Loading);
        view.show(ShowScreen::Error("offline".into()));
        view.try_again();
        assert_eq!(
            view.scene().overlay().map(|o| o.kind),
            Some(ParticleKind::Snow)
        );
    }

    #[test]
    fn test_tick_only_moves_animated_scene() {
        let mut view = controller();
        assert!(!view.tick(Duration::from_millis(80)));

        view.show(ShowScreen::Result {
            weather: weather("clear sky", 5.0),
            hour: 23,
        });
        assert!(view.tick(Duration::from_millis(80)));
        assert_eq!(view.scene().elapsed(), Duration::from_millis(80));
    }
}
