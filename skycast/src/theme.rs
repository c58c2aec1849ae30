//! Presentation mapper
//!
//! `map` turns (temperature, description, hour) into a [`Theme`]: a page
//! background, the text colour override, the particle effect and the card
//! palette. It is pure; the hour is supplied by the caller.

use ratatui::style::Color;

use crate::particles::ParticleKind;

/// 24-bit colour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Self((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    /// Composite `self` at `alpha` over `under`.
    pub fn over(self, under: Rgb, alpha: f32) -> Rgb {
        under.lerp(self, alpha)
    }

    pub fn to_color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

/// Page text colour when a dark background needs light text.
pub const LIGHT_TEXT: Rgb = Rgb::hex(0xf8f9fa);
/// Default page and card text colour.
pub const DARK_TEXT: Rgb = Rgb::hex(0x212121);
/// Secondary text on cards.
pub const MUTED_TEXT: Rgb = Rgb::hex(0x6c757d);
/// Accent before any result has been themed.
pub const DEFAULT_ACCENT: Rgb = Rgb::hex(0x3a86ff);

/// Linear gradient with evenly spaced stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
    /// CSS angle: 0 points up, 90 right, 180 down.
    pub angle: f32,
    pub stops: &'static [Rgb],
}

impl Gradient {
    pub const fn new(angle: f32, stops: &'static [Rgb]) -> Self {
        Self { angle, stops }
    }

    /// Colour at position `t` along the gradient line.
    pub fn sample(&self, t: f32) -> Rgb {
        match self.stops {
            [] => DARK_TEXT,
            [only] => *only,
            stops => {
                let t = t.clamp(0.0, 1.0);
                let segments = (stops.len() - 1) as f32;
                let scaled = t * segments;
                let index = (scaled.floor() as usize).min(stops.len() - 2);
                stops[index].lerp(stops[index + 1], scaled - index as f32)
            }
        }
    }

    /// Colour at `(x, y)` inside a `width` x `height` box.
    ///
    /// Coordinates are in the same unit on both axes; callers double terminal
    /// rows to keep cells roughly square.
    pub fn sample_at(&self, x: f32, y: f32, width: f32, height: f32) -> Rgb {
        let theta = self.angle.to_radians();
        let (dx, dy) = (theta.sin(), -theta.cos());
        let length = (width * dx).abs() + (height * dy).abs();
        if length <= f32::EPSILON {
            return self.sample(0.0);
        }
        let (cx, cy) = (x - width / 2.0, y - height / 2.0);
        self.sample((cx * dx + cy * dy) / length + 0.5)
    }
}

/// Page background selected by time of day or weather condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Background {
    Dawn,
    Day,
    Sunset,
    Night,
    Rainy,
    Snowy,
    Storm,
    Foggy,
    NightClear,
}

const DAWN: &[Rgb] = &[Rgb::hex(0xffcf77), Rgb::hex(0xf68084)];
const DAY: &[Rgb] = &[Rgb::hex(0x4facfe), Rgb::hex(0x00f2fe)];
const SUNSET: &[Rgb] = &[Rgb::hex(0xfa709a), Rgb::hex(0xfee140)];
const NIGHT: &[Rgb] = &[Rgb::hex(0x141e30), Rgb::hex(0x243b55)];
const RAINY: &[Rgb] = &[Rgb::hex(0x929ead), Rgb::hex(0x5a6a81)];
const SNOWY: &[Rgb] = &[Rgb::hex(0xe0eafc), Rgb::hex(0xcfdef3)];
const STORM: &[Rgb] = &[Rgb::hex(0x292e49), Rgb::hex(0x536976)];
const FOGGY: &[Rgb] = &[Rgb::hex(0xd9dee5), Rgb::hex(0xb3becf)];
const NIGHT_CLEAR: &[Rgb] = &[
    Rgb::hex(0x0f2027),
    Rgb::hex(0x203a43),
    Rgb::hex(0x2c5364),
];

impl Background {
    /// Time-of-day base for a local hour.
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=7 => Background::Dawn,
            8..=16 => Background::Day,
            17..=19 => Background::Sunset,
            _ => Background::Night,
        }
    }

    pub fn gradient(self) -> Gradient {
        const DIAGONAL: f32 = 135.0;
        const TO_BOTTOM: f32 = 180.0;
        match self {
            Background::Dawn => Gradient::new(DIAGONAL, DAWN),
            Background::Day => Gradient::new(DIAGONAL, DAY),
            Background::Sunset => Gradient::new(DIAGONAL, SUNSET),
            Background::Night => Gradient::new(DIAGONAL, NIGHT),
            Background::Rainy => Gradient::new(TO_BOTTOM, RAINY),
            Background::Snowy => Gradient::new(TO_BOTTOM, SNOWY),
            Background::Storm => Gradient::new(TO_BOTTOM, STORM),
            Background::Foggy => Gradient::new(TO_BOTTOM, FOGGY),
            Background::NightClear => Gradient::new(TO_BOTTOM, NIGHT_CLEAR),
        }
    }
}

/// Temperature band driving the card palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemperatureBand {
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
}

impl TemperatureBand {
    /// Upper bounds are inclusive. NaN compares false everywhere and lands in
    /// `Hot`.
    pub fn from_celsius(temperature: f64) -> Self {
        if temperature <= 0.0 {
            TemperatureBand::Cold
        } else if temperature <= 10.0 {
            TemperatureBand::Cool
        } else if temperature <= 20.0 {
            TemperatureBand::Mild
        } else if temperature <= 30.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Hot
        }
    }

    pub fn card_style(self) -> CardStyle {
        let (from, to, shadow, shadow_alpha, accent) = match self {
            TemperatureBand::Cold => (
                Rgb(224, 242, 255),
                Rgb(191, 228, 255),
                Rgb(11, 70, 168),
                0.15,
                Rgb::hex(0x2c7be5),
            ),
            TemperatureBand::Cool => (
                Rgb(228, 243, 255),
                Rgb(202, 234, 255),
                Rgb(27, 107, 212),
                0.12,
                Rgb::hex(0x3a86ff),
            ),
            TemperatureBand::Mild => (
                Rgb(230, 255, 230),
                Rgb(210, 245, 210),
                Rgb(34, 139, 34),
                0.12,
                Rgb::hex(0x38b000),
            ),
            TemperatureBand::Warm => (
                Rgb(255, 245, 220),
                Rgb(252, 235, 190),
                Rgb(223, 136, 31),
                0.12,
                Rgb::hex(0xff9900),
            ),
            TemperatureBand::Hot => (
                Rgb(255, 230, 220),
                Rgb(252, 210, 200),
                Rgb(223, 71, 31),
                0.15,
                Rgb::hex(0xff5a5f),
            ),
        };
        CardStyle {
            main: CardFill {
                from,
                to,
                alpha: 0.9,
            },
            details: CardFill {
                from,
                to,
                alpha: 0.8,
            },
            shadow_tint: shadow,
            shadow_alpha,
            accent,
        }
    }
}

/// Translucent two-stop card fill, drawn at 120 degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardFill {
    pub from: Rgb,
    pub to: Rgb,
    pub alpha: f32,
}

impl CardFill {
    pub const ANGLE: f32 = 120.0;

    /// Card colour at `(x, y)` composited over `under`.
    pub fn color_at(&self, x: f32, y: f32, width: f32, height: f32, under: Rgb) -> Rgb {
        let stops = [self.from, self.to];
        let theta = Self::ANGLE.to_radians();
        let (dx, dy) = (theta.sin(), -theta.cos());
        let length = (width * dx).abs() + (height * dy).abs();
        let t = if length <= f32::EPSILON {
            0.0
        } else {
            ((x - width / 2.0) * dx + (y - height / 2.0) * dy) / length + 0.5
        };
        stops[0].lerp(stops[1], t).over(under, self.alpha)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStyle {
    pub main: CardFill,
    pub details: CardFill,
    pub shadow_tint: Rgb,
    pub shadow_alpha: f32,
    /// Primary colour for headings and the temperature.
    pub accent: Rgb,
}

/// Everything the presentation mapper decides for one result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub background: Background,
    /// Page-level text switches to [`LIGHT_TEXT`].
    pub light_text: bool,
    pub particle: ParticleKind,
    pub band: TemperatureBand,
}

impl Theme {
    pub fn card(&self) -> CardStyle {
        self.band.card_style()
    }

    pub fn page_text(&self) -> Rgb {
        if self.light_text { LIGHT_TEXT } else { DARK_TEXT }
    }
}

/// Derive the theme for a result.
///
/// The hour picks a base background; a matching description overrides it
/// (first match wins). The text override set by the base is never cleared.
pub fn map(temperature: f64, description: &str, hour: u32) -> Theme {
    let mut background = Background::for_hour(hour);
    let mut light_text = background == Background::Night;
    let mut particle = ParticleKind::None;

    let desc = description.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| desc.contains(w));

    if has(&["rain", "drizzle", "shower"]) {
        background = Background::Rainy;
        particle = ParticleKind::Rain;
    } else if has(&["snow"]) {
        background = Background::Snowy;
        particle = ParticleKind::Snow;
    } else if has(&["thunder", "storm"]) {
        background = Background::Storm;
        light_text = true;
    } else if has(&["fog", "mist", "haze"]) {
        background = Background::Foggy;
        particle = ParticleKind::Fog;
    } else if has(&["clear"]) && !(5..20).contains(&hour) {
        background = Background::NightClear;
        light_text = true;
        particle = ParticleKind::Stars;
    }

    Theme {
        background,
        light_text,
        particle,
        band: TemperatureBand::from_celsius(temperature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_rain_in_the_afternoon() {
        let theme = map(15.0, "light rain", 14);
        assert_eq!(theme.background, Background::Rainy);
        assert_eq!(theme.particle, ParticleKind::Rain);
        assert!(!theme.light_text);
        assert_eq!(theme.band, TemperatureBand::Mild);
        assert_eq!(theme.card().accent, Rgb::hex(0x38b000));
    }

    #[test]
    fn test_clear_sky_late_evening() {
        let theme = map(-5.0, "clear sky", 23);
        assert_eq!(theme.background, Background::NightClear);
        assert_eq!(theme.particle, ParticleKind::Stars);
        assert!(theme.light_text);
        assert_eq!(theme.band, TemperatureBand::Cold);
        assert_eq!(theme.card().accent, Rgb::hex(0x2c7be5));
    }

    #[test]
    fn test_thunderstorm_at_dawn() {
        let theme = map(25.0, "thunderstorm", 6);
        assert_eq!(theme.background, Background::Storm);
        assert_eq!(theme.particle, ParticleKind::None);
        assert!(theme.light_text);
        assert_eq!(theme.band, TemperatureBand::Warm);
    }

    #[test]
    fn test_overcast_night_keeps_night_base() {
        let theme = map(10.0, "overcast clouds", 3);
        assert_eq!(theme.background, Background::Night);
        assert!(theme.light_text);
        assert_eq!(theme.particle, ParticleKind::None);
        assert_eq!(theme.band, TemperatureBand::Cool);
    }

    #[test]
    fn test_clear_during_day_has_no_stars() {
        let theme = map(18.0, "clear sky", 12);
        assert_eq!(theme.background, Background::Day);
        assert_eq!(theme.particle, ParticleKind::None);
        assert!(!theme.light_text);
    }

    #[test]
    fn test_clear_at_hour_boundaries() {
        assert_eq!(map(5.0, "Clear", 4).particle, ParticleKind::Stars);
        assert_eq!(map(5.0, "Clear", 5).particle, ParticleKind::None);
        assert_eq!(map(5.0, "Clear", 19).particle, ParticleKind::None);
        assert_eq!(map(5.0, "Clear", 20).particle, ParticleKind::Stars);
    }

    #[test]
    fn test_override_order_rain_beats_snow() {
        let theme = map(0.5, "rain and snow", 12);
        assert_eq!(theme.particle, ParticleKind::Rain);
        let theme = map(0.5, "Snow showers", 12);
        assert_eq!(theme.particle, ParticleKind::Rain);
    }

    #[test]
    fn test_fog_family() {
        for desc in ["fog", "mist", "Haze"] {
            let theme = map(12.0, desc, 9);
            assert_eq!(theme.background, Background::Foggy, "{desc}");
            assert_eq!(theme.particle, ParticleKind::Fog);
        }
    }

    #[test]
    fn test_night_light_text_survives_override() {
        let theme = map(1.0, "light snow", 23);
        assert_eq!(theme.background, Background::Snowy);
        assert!(theme.light_text);
    }

    #[test]
    fn test_hour_bases() {
        assert_eq!(Background::for_hour(4), Background::Night);
        assert_eq!(Background::for_hour(5), Background::Dawn);
        assert_eq!(Background::for_hour(8), Background::Day);
        assert_eq!(Background::for_hour(17), Background::Sunset);
        assert_eq!(Background::for_hour(20), Background::Night);
    }

    #[test]
    fn test_temperature_bands_inclusive() {
        assert_eq!(TemperatureBand::from_celsius(0.0), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::from_celsius(0.1), TemperatureBand::Cool);
        assert_eq!(TemperatureBand::from_celsius(10.0), TemperatureBand::Cool);
        assert_eq!(TemperatureBand::from_celsius(20.0), TemperatureBand::Mild);
        assert_eq!(TemperatureBand::from_celsius(30.0), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::from_celsius(30.5), TemperatureBand::Hot);
        assert_eq!(TemperatureBand::from_celsius(f64::NAN), TemperatureBand::Hot);
    }

    #[test]
    fn test_card_alphas() {
        let style = TemperatureBand::Hot.card_style();
        assert_eq!(style.main.alpha, 0.9);
        assert_eq!(style.details.alpha, 0.8);
        assert_eq!(style.main.from, style.details.from);
        assert_eq!(style.shadow_tint, Rgb(223, 71, 31));
    }

    #[test]
    fn test_gradient_sampling() {
        let gradient = Background::NightClear.gradient();
        assert_eq!(gradient.sample(0.0), Rgb::hex(0x0f2027));
        assert_eq!(gradient.sample(0.5), Rgb::hex(0x203a43));
        assert_eq!(gradient.sample(1.0), Rgb::hex(0x2c5364));

        let to_bottom = Background::Rainy.gradient();
        assert_eq!(to_bottom.sample_at(5.0, 0.0, 10.0, 10.0), Rgb::hex(0x929ead));
        assert_eq!(to_bottom.sample_at(5.0, 10.0, 10.0, 10.0), Rgb::hex(0x5a6a81));
    }

    #[test]
    fn test_rgb_helpers() {
        assert_eq!(Rgb::hex(0x4facfe), Rgb(0x4f, 0xac, 0xfe));
        assert_eq!(Rgb(0, 0, 0).lerp(Rgb(255, 255, 255), 0.5), Rgb(128, 128, 128));
        assert_eq!(Rgb(255, 0, 0).over(Rgb(0, 0, 255), 1.0), Rgb(255, 0, 0));
    }
}
