use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
};

use super::{Component, centered};
use crate::action::Action;
use crate::theme::Rgb;

pub const WELCOME_TITLE: &str = "Welcome to Weather App";
pub const WELCOME_HINT: &str = "Enter a city name in the search box above to get started";

pub struct WelcomeProps {
    pub text_color: Rgb,
    pub accent: Rgb,
}

pub struct Welcome;

impl Component<Action> for Welcome {
    type Props<'a> = WelcomeProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let lines = vec![
            Line::styled(
                "☁",
                Style::default().fg(props.accent.to_color()),
            ),
            Line::default(),
            Line::styled(
                WELCOME_TITLE,
                Style::default()
                    .fg(props.text_color.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::styled(WELCOME_HINT, Style::default().fg(props.text_color.to_color())),
        ];

        let box_area = centered(area, 60, lines.len() as u16 + 1);
        let paragraph = Paragraph::new(lines).centered().wrap(Wrap { trim: true });
        frame.render_widget(paragraph, box_area);
    }
}
