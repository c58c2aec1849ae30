//! skycast - terminal weather lookup
//!
//! A single-screen widget: a city search bar above one of four screens
//! (welcome, loading, error, result). Results re-theme the page with a
//! time-of-day or condition backdrop, a temperature-tinted card and an
//! animated particle overlay.
//!
//! State flows one way: events become [`action::Action`]s, the
//! [`reducer::reducer`] updates [`state::AppState`] and declares
//! [`effect::Effect`]s, and the [`runtime::Runtime`] runs the effects and
//! re-renders when state changed.

// lets `#[derive(skycast_macros::Action)]` resolve `::skycast` inside this crate
extern crate self as skycast;

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod event;
pub mod icons;
pub mod logging;
pub mod particles;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod store;
pub mod tasks;
pub mod testing;
pub mod theme;
pub mod view;
