//! Weather card for the Result screen
//!
//! Two translucent sections composited over whatever the backdrop drew: the
//! main section with location, condition and temperature, and the details
//! section below it. A one-cell shadow is cast down and to the right.

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use super::backdrop::PAGE_BACKGROUND;
use crate::action::Action;
use crate::icons;
use crate::state::{WeatherResult, display_number};
use crate::theme::{CardFill, DARK_TEXT, Rgb, Theme};

pub const CARD_WIDTH: u16 = 52;
const MAIN_HEIGHT: u16 = 7;
const DETAILS_HEIGHT: u16 = 6;
const SECONDARY_TEXT: Rgb = Rgb::hex(0x757575);

pub struct WeatherCardProps<'a> {
    pub weather: &'a WeatherResult,
    pub theme: &'a Theme,
}

pub struct WeatherCard;

/// Temperature as shown on the card: `15°C`.
pub fn celsius(value: f64) -> String {
    format!("{}°C", display_number(value))
}

/// Detail lines in display order.
pub fn detail_lines(weather: &WeatherResult) -> [String; 4] {
    [
        format!("Feels like {}", celsius(weather.feels_like)),
        format!("Humidity {}%", display_number(weather.humidity)),
        format!("Wind {} m/s", display_number(weather.wind_speed)),
        format!("Pressure {} hPa", display_number(weather.pressure)),
    ]
}

fn cell_rgb(buf: &Buffer, x: u16, y: u16) -> Rgb {
    match buf[(x, y)].bg {
        Color::Rgb(r, g, b) => Rgb(r, g, b),
        _ => PAGE_BACKGROUND,
    }
}

fn fill(buf: &mut Buffer, rect: Rect, fill: &CardFill) {
    let (w, h) = (rect.width as f32, rect.height as f32 * 2.0);
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            let under = cell_rgb(buf, x, y);
            let color = fill.color_at(
                (x - rect.x) as f32 + 0.5,
                ((y - rect.y) as f32 + 0.5) * 2.0,
                w,
                h,
                under,
            );
            buf[(x, y)].set_symbol(" ").set_bg(color.to_color());
        }
    }
}

fn shadow(buf: &mut Buffer, card: Rect, bounds: Rect, tint: Rgb, alpha: f32) {
    let right = card.right();
    let bottom = card.bottom();
    let mut darken = |x: u16, y: u16| {
        if x < bounds.right() && y < bounds.bottom() {
            let under = cell_rgb(buf, x, y);
            buf[(x, y)].set_bg(tint.over(under, alpha).to_color());
        }
    };
    for y in card.y + 1..=bottom {
        darken(right, y);
    }
    for x in card.x + 1..right {
        darken(x, bottom);
    }
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let weather = props.weather;
        let style = props.theme.card();

        let width = CARD_WIDTH.min(area.width.saturating_sub(1));
        let height = (MAIN_HEIGHT + DETAILS_HEIGHT).min(area.height.saturating_sub(1));
        if width < 4 || height < 2 {
            return;
        }
        let card = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        let [main, details] =
            Layout::vertical([Constraint::Length(MAIN_HEIGHT), Constraint::Min(0)]).areas(card);

        let buf = frame.buffer_mut();
        shadow(buf, card, area, style.shadow_tint, style.shadow_alpha);
        fill(buf, main, &style.main);
        fill(buf, details, &style.details);

        let accent = Style::default()
            .fg(style.accent.to_color())
            .add_modifier(Modifier::BOLD);
        let text = Style::default().fg(DARK_TEXT.to_color());
        let secondary = Style::default().fg(SECONDARY_TEXT.to_color());

        let condition = icons::lookup(&weather.icon_code);
        let icon = match condition {
            Some(c) => Span::styled(c.glyph, Style::default().fg(c.color.to_color())),
            None => Span::styled("?", secondary),
        };
        let main_lines = vec![
            Line::default(),
            Line::styled(weather.location(), accent),
            Line::default(),
            Line::from(vec![
                icon,
                Span::raw("  "),
                Span::styled(celsius(weather.temperature), accent),
            ]),
            Line::styled(weather.description.clone(), text),
            Line::styled(condition.map(|c| c.label).unwrap_or_default(), secondary),
        ];
        frame.render_widget(Paragraph::new(main_lines).centered(), main);

        let inner = details.inner(Margin::new(2, 1));
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(inner);
        let [feels, humidity, wind, pressure] = detail_lines(weather);
        frame.render_widget(
            Paragraph::new(vec![Line::styled(feels, text), Line::styled(wind, text)]),
            left,
        );
        frame.render_widget(
            Paragraph::new(vec![Line::styled(humidity, text), Line::styled(pressure, text)]),
            right,
        );

        let [_, footer] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(inner);
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!("Last updated: {}", weather.last_updated),
                secondary,
            ))
            .centered(),
            footer,
        );
    }
}
