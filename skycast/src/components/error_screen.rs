//! Error screen with a "Try Again" button
//!
//! The message is rendered verbatim. The button takes focus when the screen
//! is shown; activating it emits `on_retry`.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{Component, centered};
use crate::action::Action;
use crate::event::EventKind;
use crate::theme::{MUTED_TEXT, Rgb};

pub const ERROR_TITLE: &str = "Error";
pub const TRY_AGAIN_LABEL: &str = " Try Again ";

const ERROR_RED: Rgb = Rgb::hex(0xdc3545);
const BOX_WIDTH: u16 = 64;

pub struct ErrorScreenProps<'a> {
    pub message: &'a str,
    /// Whether the "Try Again" button has focus
    pub is_focused: bool,
    pub text_color: Rgb,
    pub accent: Rgb,
    pub on_retry: Action,
}

pub struct ErrorScreen;

impl Component<Action> for ErrorScreen {
    type Props<'a> = ErrorScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => Some(props.on_retry),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let button_style = if props.is_focused {
            Style::default()
                .fg(Color::White)
                .bg(props.accent.to_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(props.accent.to_color())
                .add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::styled(
                format!("⚠ {ERROR_TITLE}"),
                Style::default()
                    .fg(ERROR_RED.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::styled(
                props.message.to_string(),
                Style::default().fg(props.text_color.to_color()),
            ),
            Line::default(),
            Line::from(vec![
                Span::styled("[", Style::default().fg(MUTED_TEXT.to_color())),
                Span::styled(TRY_AGAIN_LABEL, button_style),
                Span::styled("]", Style::default().fg(MUTED_TEXT.to_color())),
            ]),
        ];

        // height follows the wrapped message so the button stays inside
        let width = BOX_WIDTH.min(area.width);
        let paragraph = Paragraph::new(lines).centered().wrap(Wrap { trim: true });
        let height = u16::try_from(paragraph.line_count(width)).unwrap_or(u16::MAX);
        frame.render_widget(paragraph, centered(area, width, height.saturating_add(2)));
    }
}
