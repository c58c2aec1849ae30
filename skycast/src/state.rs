//! Application state - single source of truth
//!
//! Components receive `&AppState` as props; only the reducer mutates it.

use std::time::Duration;

use rand::rngs::StdRng;

use crate::view::{ShowScreen, ViewController, ViewState};

/// One successful lookup, replaced wholesale by the next one.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherResult {
    pub city: String,
    pub country: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub description: String,
    /// Provider icon code such as `10d`.
    pub icon_code: String,
    pub feels_like: f64,
    /// Percent, 0-100.
    pub humidity: f64,
    /// Metres per second.
    pub wind_speed: f64,
    /// Hectopascal.
    pub pressure: f64,
    pub last_updated: String,
}

impl WeatherResult {
    /// `"<city>, <country>"`
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }

    pub fn icon_url(&self, icon_host: &str) -> String {
        format!("https://{icon_host}/img/wn/{}@2x.png", self.icon_code)
    }
}

/// Format a number the way a browser prints it: `15`, `3.6`, `-0.5`.
pub fn display_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

/// Which control receives key input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    SearchBar,
    TryAgain,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::SearchBar => Focus::TryAgain,
            Focus::TryAgain => Focus::SearchBar,
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug)]
pub struct AppState {
    /// Search bar contents, kept across transitions
    pub query: String,

    pub focus: Focus,

    /// Visible screen and the themed scene behind it
    pub view: ViewController,

    /// Bumped on every submission; completions carrying an older value are stale
    pub search_generation: u64,

    pub terminal_size: (u16, u16),

    /// Animation frame counter (loading spinner)
    pub tick_count: u32,

    /// Scene time added per tick
    pub tick_interval: Duration,

    /// Host serving condition icons
    pub icon_host: String,
}

impl AppState {
    pub fn new(rng: StdRng, icon_host: impl Into<String>, tick_interval: Duration) -> Self {
        let mut view = ViewController::new(rng);
        view.show(ShowScreen::Welcome);
        Self {
            query: String::new(),
            focus: Focus::SearchBar,
            view,
            search_generation: 0,
            terminal_size: (80, 24),
            tick_count: 0,
            tick_interval,
            icon_host: icon_host.into(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_visible(ViewState::Loading)
    }

    /// The search button is enabled only for a non-blank query.
    pub fn can_search(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::particle_rng;

    #[test]
    fn test_display_number_like_browser() {
        assert_eq!(display_number(15.0), "15");
        assert_eq!(display_number(3.6), "3.6");
        assert_eq!(display_number(-0.5), "-0.5");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(1012.0), "1012");
    }

    #[test]
    fn test_location_and_icon_url() {
        let weather = WeatherResult {
            city: "London".into(),
            country: "GB".into(),
            temperature: 15.0,
            description: "light rain".into(),
            icon_code: "10d".into(),
            feels_like: 14.0,
            humidity: 80.0,
            wind_speed: 3.6,
            pressure: 1012.0,
            last_updated: "2024-01-01 12:00:00".into(),
        };
        assert_eq!(weather.location(), "London, GB");
        assert_eq!(
            weather.icon_url("openweathermap.org"),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new(particle_rng(Some(1)), "openweathermap.org", Duration::from_millis(80));
        assert_eq!(state.view.active(), ViewState::Welcome);
        assert_eq!(state.focus, Focus::SearchBar);
        assert!(!state.is_loading());
        assert!(!state.can_search());
    }

    #[test]
    fn test_can_search_ignores_whitespace() {
        let mut state = AppState::new(particle_rng(Some(1)), "h", Duration::ZERO);
        state.query = "   ".into();
        assert!(!state.can_search());
        state.query = " Paris ".into();
        assert!(state.can_search());
    }
}
