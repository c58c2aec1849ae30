//! City search bar: a single-line input with a Search button
//!
//! The bar sits above every screen. Typing emits `on_change` with the new
//! value, Enter emits `on_submit` even when the input is blank so the empty
//! input error can be shown.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::event::EventKind;
use crate::theme::{DARK_TEXT, MUTED_TEXT, Rgb};

pub const PLACEHOLDER: &str = "Enter city name...";
pub const BUTTON_LABEL: &str = " Search ";

const INPUT_BG: Rgb = Rgb(255, 255, 255);
const DISABLED_BG: Rgb = Rgb::hex(0x6c757d);

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
    /// Whether the trimmed query is non-empty; the button is dimmed otherwise
    pub can_search: bool,
    pub accent: Rgb,
    pub on_change: fn(String) -> Action,
    pub on_submit: fn() -> Action,
}

/// Cursor position is the only state kept here
#[derive(Default)]
pub struct SearchBar {
    /// Byte index into the query
    cursor: usize,
    /// Query as of the last edit made here or the last props seen
    seen: String,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the query in props. A value set elsewhere (startup `--city`,
    /// clearing on submit) puts the cursor at its end.
    fn sync(&mut self, value: &str) {
        if self.seen != value {
            self.seen.clear();
            self.seen.push_str(value);
            self.cursor = value.len();
        }
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().last() {
            self.cursor = i;
        }
    }

    fn move_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..self.cursor]);
        next.push(c);
        next.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        next
    }

    fn backspace(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().last()?;
        let mut next = String::with_capacity(value.len());
        next.push_str(&value[..start]);
        next.push_str(&value[self.cursor..]);
        self.cursor = start;
        Some(next)
    }

    fn delete(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        let mut next = String::with_capacity(value.len());
        next.push_str(&value[..self.cursor]);
        next.push_str(&value[self.cursor + c.len_utf8()..]);
        Some(next)
    }

    /// Record an edit made here so the echoed query keeps the cursor.
    fn changed(&mut self, next: String, on_change: fn(String) -> Action) -> Action {
        self.seen.clone_from(&next);
        on_change(next)
    }

    /// Display column of the cursor.
    fn cursor_column(&self, value: &str) -> u16 {
        Span::raw(&value[..self.cursor]).width() as u16
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        self.sync(props.query);

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.query.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some(self.changed(String::new(), props.on_change))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let next = self.insert(props.query, c);
                Some(self.changed(next, props.on_change))
            }
            KeyCode::Backspace => self
                .backspace(props.query)
                .map(|next| self.changed(next, props.on_change)),
            KeyCode::Delete => self
                .delete(props.query)
                .map(|next| self.changed(next, props.on_change)),
            KeyCode::Left => {
                self.move_left(props.query);
                None
            }
            KeyCode::Right => {
                self.move_right(props.query);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.query.len();
                None
            }
            KeyCode::Enter => Some((props.on_submit)()),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.query);

        let button_width = BUTTON_LABEL.len() as u16 + 2;
        let [input_area, button_area] =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(button_width)])
                .areas(area);

        let border = if props.is_focused {
            props.accent
        } else {
            MUTED_TEXT
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border.to_color()).bg(INPUT_BG.to_color()))
            .style(Style::default().bg(INPUT_BG.to_color()));
        let inner = block.inner(input_area);

        let text = if props.query.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(MUTED_TEXT.to_color()))
        } else {
            Span::styled(props.query, Style::default().fg(DARK_TEXT.to_color()))
        };
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), input_area);

        if props.is_focused && inner.width > 0 && inner.height > 0 {
            let column = self.cursor_column(props.query).min(inner.width - 1);
            frame.set_cursor_position((inner.x + column, inner.y));
        }

        let button_style = if props.can_search {
            Style::default()
                .fg(Color::White)
                .bg(props.accent.to_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Rgb(222, 226, 230).to_color())
                .bg(DISABLED_BG.to_color())
                .add_modifier(Modifier::DIM)
        };
        let button = Paragraph::new(Line::from(BUTTON_LABEL).centered())
            .block(Block::default().borders(Borders::ALL).border_style(button_style))
            .style(button_style);
        frame.render_widget(button, button_area);
    }
}
