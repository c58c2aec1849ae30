use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::Focus;
use crate::theme::Rgb;

pub struct HelpBarProps {
    pub focus: Focus,
    /// Whether the "Try Again" button is on screen
    pub has_button: bool,
    pub text_color: Rgb,
    pub accent: Rgb,
}

pub struct HelpBar;

impl HelpBar {
    fn hints(props: &HelpBarProps) -> Vec<(&'static str, &'static str)> {
        let mut hints = match props.focus {
            Focus::SearchBar => vec![("enter", "search")],
            Focus::TryAgain => vec![("enter", "try again"), ("q", "quit")],
        };
        if props.has_button {
            hints.push(("tab", "focus"));
        }
        hints.push(("esc", "quit"));
        hints
    }
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let key_style = Style::default()
            .fg(props.accent.to_color())
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(props.text_color.to_color());

        let spans: Vec<Span> = Self::hints(&props)
            .into_iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {key}"), key_style),
                    Span::styled(format!(" {label} "), label_style),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
