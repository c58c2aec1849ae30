//! Root component: lays out the page and routes key input by focus

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use super::{
    Backdrop, BackdropProps, Component, ErrorScreen, ErrorScreenProps, HelpBar, HelpBarProps,
    Loading, LoadingProps, SearchBar, SearchBarProps, WeatherCard, WeatherCardProps, Welcome,
    WelcomeProps,
};
use crate::action::Action;
use crate::event::EventKind;
use crate::state::{AppState, Focus};
use crate::theme::{DARK_TEXT, DEFAULT_ACCENT, Rgb};
use crate::view::{Screen, ViewState};

pub const APP_TITLE: &str = "Weather App";
const SEARCH_WIDTH: u16 = 60;

pub struct AppViewProps<'a> {
    pub state: &'a AppState,
}

#[derive(Default)]
pub struct AppView {
    backdrop: Backdrop,
    search_bar: SearchBar,
}

impl AppView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accent of the last themed result, kept after leaving it.
    fn accent(state: &AppState) -> Rgb {
        state.view.scene().accent().unwrap_or(DEFAULT_ACCENT)
    }

    /// Colour of text drawn straight onto the page.
    fn page_text(state: &AppState) -> Rgb {
        state.view.scene().foreground().unwrap_or(DARK_TEXT)
    }

    fn search_props(state: &AppState) -> SearchBarProps<'_> {
        SearchBarProps {
            query: &state.query,
            is_focused: state.focus == Focus::SearchBar,
            can_search: state.can_search(),
            accent: Self::accent(state),
            on_change: Action::SearchInputChange,
            on_submit: || Action::SearchSubmit,
        }
    }
}

impl Component<Action> for AppView {
    type Props<'a> = AppViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        let key = match event {
            EventKind::Resize(w, h) => return vec![Action::UiResize(*w, *h)],
            EventKind::Key(key) => key,
        };

        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return vec![Action::Quit];
        }
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            return vec![Action::FocusToggle];
        }

        match (state.focus, state.view.screen()) {
            (Focus::SearchBar, _) => self
                .search_bar
                .handle_event(event, Self::search_props(state))
                .into_iter()
                .collect::<Vec<_>>(),
            (Focus::TryAgain, Screen::Error { message }) => ErrorScreen
                .handle_event(
                    event,
                    ErrorScreenProps {
                        message,
                        is_focused: true,
                        text_color: Self::page_text(state),
                        accent: Self::accent(state),
                        on_retry: Action::ErrorRetry,
                    },
                )
                .into_iter()
                .collect::<Vec<_>>(),
            (Focus::TryAgain, _) => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let scene = state.view.scene();
        let text_color = Self::page_text(state);
        let accent = Self::accent(state);

        self.backdrop.render(frame, area, BackdropProps { scene });

        let [_, title_area, _, search_row, screen_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let title = Paragraph::new(Line::styled(
            APP_TITLE,
            Style::default()
                .fg(text_color.to_color())
                .add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(title, title_area);

        let search_width = SEARCH_WIDTH.min(search_row.width.saturating_sub(4));
        let search_area = Rect {
            x: search_row.x + (search_row.width - search_width) / 2,
            width: search_width,
            ..search_row
        };
        self.search_bar
            .render(frame, search_area, Self::search_props(state));

        match state.view.screen() {
            Screen::Welcome => Welcome.render(
                frame,
                screen_area,
                WelcomeProps {
                    text_color,
                    accent,
                },
            ),
            Screen::Loading => Loading.render(
                frame,
                screen_area,
                LoadingProps {
                    tick_count: state.tick_count,
                    text_color,
                    accent,
                },
            ),
            Screen::Error { message } => ErrorScreen.render(
                frame,
                screen_area,
                ErrorScreenProps {
                    message,
                    is_focused: state.focus == Focus::TryAgain,
                    text_color,
                    accent,
                    on_retry: Action::ErrorRetry,
                },
            ),
            Screen::Result { weather, theme } => {
                WeatherCard.render(frame, screen_area, WeatherCardProps { weather, theme })
            }
        }

        HelpBar.render(
            frame,
            help_area,
            HelpBarProps {
                focus: state.focus,
                has_button: state.view.is_visible(ViewState::Error),
                text_color,
                accent,
            },
        );
    }
}
