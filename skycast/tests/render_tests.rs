//! Render tests for each screen through the root view

use std::time::Duration;

use skycast::components::{AppView, AppViewProps, Component};
use skycast::particles::particle_rng;
use skycast::state::{AppState, Focus, WeatherResult};
use skycast::testing::RenderHarness;
use skycast::theme::{DARK_TEXT, LIGHT_TEXT};
use skycast::view::ShowScreen;

fn state() -> AppState {
    AppState::new(particle_rng(Some(11)), "icons.test", Duration::from_millis(80))
}

fn weather(description: &str) -> WeatherResult {
    WeatherResult {
        city: "London".into(),
        country: "GB".into(),
        temperature: 15.0,
        description: description.into(),
        icon_code: "10d".into(),
        feels_like: 14.2,
        humidity: 80.0,
        wind_speed: 3.6,
        pressure: 1012.0,
        last_updated: "2024-01-01 12:00:00".into(),
    }
}

fn render(state: &AppState) -> String {
    let mut harness = RenderHarness::new(80, 26);
    let mut view = AppView::new();
    harness.render_to_string_plain(|frame| {
        let area = frame.area();
        view.render(frame, area, AppViewProps { state });
    })
}

#[test]
fn test_render_welcome() {
    let output = render(&state());
    assert!(output.contains("Weather App"));
    assert!(output.contains("Welcome to Weather App"));
    assert!(output.contains("Enter a city name in the search box above to get started"));
    assert!(output.contains("Enter city name..."));
}

#[test]
fn test_render_loading() {
    let mut state = state();
    state.query = "London".into();
    state.view.show(ShowScreen::Loading);
    let output = render(&state);
    assert!(output.contains("Loading weather data..."));
    assert!(output.contains("London"));
}

#[test]
fn test_render_error() {
    let mut state = state();
    state.view.show(ShowScreen::Error("City not found".into()));
    state.focus = Focus::TryAgain;
    let output = render(&state);
    assert!(output.contains("Error"));
    assert!(output.contains("City not found"));
    assert!(output.contains("Try Again"));
}

#[test]
fn test_render_result() {
    let mut state = state();
    state.view.show(ShowScreen::Result {
        weather: weather("light rain"),
        hour: 12,
    });
    let output = render(&state);
    assert!(output.contains("London, GB"));
    assert!(output.contains("15°C"));
    assert!(output.contains("Humidity 80%"));
    assert!(output.contains("Last updated: 2024-01-01 12:00:00"));
    assert!(!output.contains("Welcome to Weather App"));
}

#[test]
fn test_night_result_lightens_page_text() {
    let mut harness = RenderHarness::new(80, 26);
    let mut view = AppView::new();
    let mut state = state();

    let title_x = (80 - "Weather App".len() as u16) / 2;
    let before = harness.render(|frame| {
        let area = frame.area();
        view.render(frame, area, AppViewProps { state: &state });
    });
    assert_eq!(before[(title_x, 1)].fg, DARK_TEXT.to_color());

    state.view.show(ShowScreen::Result {
        weather: weather("clear sky"),
        hour: 22,
    });
    let after = harness.render(|frame| {
        let area = frame.area();
        view.render(frame, area, AppViewProps { state: &state });
    });
    assert_eq!(after[(title_x, 1)].fg, LIGHT_TEXT.to_color());
}
