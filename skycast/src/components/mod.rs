//! UI components
//!
//! Components are pure: props carry everything needed to render,
//! `handle_event` returns actions and never mutates application state.
//! Internal UI state such as a cursor position may live in `&mut self`.

pub mod app_view;
pub mod backdrop;
pub mod error_screen;
pub mod help_bar;
pub mod loading;
pub mod search_bar;
pub mod weather_card;
pub mod welcome;

use ratatui::{Frame, layout::Rect};

use crate::event::EventKind;

pub use app_view::{AppView, AppViewProps};
pub use backdrop::{Backdrop, BackdropProps};
pub use error_screen::{ErrorScreen, ErrorScreenProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use loading::{Loading, LoadingProps, SPINNERS};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_card::{WeatherCard, WeatherCardProps};
pub use welcome::{Welcome, WelcomeProps};

/// A UI element that renders from props and emits actions
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch.
    ///
    /// Render-only components keep the default, which emits nothing.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}

/// Centre a `width` x `height` box inside `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
