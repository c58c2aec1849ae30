use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{Component, centered};
use crate::action::Action;
use crate::theme::Rgb;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];
pub const LOADING_TEXT: &str = "Loading weather data...";

pub struct LoadingProps {
    pub tick_count: u32,
    pub text_color: Rgb,
    pub accent: Rgb,
}

pub struct Loading;

impl Loading {
    /// Spinner frame; advances every other tick.
    pub fn spinner(tick_count: u32) -> &'static str {
        SPINNERS[(tick_count as usize / 2) % SPINNERS.len()]
    }
}

impl Component<Action> for Loading {
    type Props<'a> = LoadingProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = Line::from(vec![
            Span::styled(
                Self::spinner(props.tick_count),
                Style::default()
                    .fg(props.accent.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(LOADING_TEXT, Style::default().fg(props.text_color.to_color())),
        ]);
        frame.render_widget(Paragraph::new(line).centered(), centered(area, 40, 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles_every_other_tick() {
        assert_eq!(Loading::spinner(0), "◐");
        assert_eq!(Loading::spinner(1), "◐");
        assert_eq!(Loading::spinner(2), "◓");
        assert_eq!(Loading::spinner(8), "◐");
    }
}
