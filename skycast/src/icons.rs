//! Condition icons
//!
//! The provider image is shown in the terminal as a glyph picked from the
//! icon code, tinted with the colour for that condition.

use crate::theme::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Condition {
    pub label: &'static str,
    pub glyph: &'static str,
    pub color: Rgb,
}

const fn condition(label: &'static str, glyph: &'static str, color: u32) -> Condition {
    Condition {
        label,
        glyph,
        color: Rgb::hex(color),
    }
}

/// Look up an icon code such as `10d`.
pub fn lookup(icon_code: &str) -> Option<Condition> {
    let found = match icon_code {
        "01d" => condition("Clear sky (day)", "☀", 0xffb300),
        "01n" => condition("Clear sky (night)", "☾", 0x1a237e),
        "02d" => condition("Few clouds (day)", "⛅", 0x90caf9),
        "02n" => condition("Few clouds (night)", "⛅", 0x303f9f),
        "03d" => condition("Scattered clouds", "☁", 0xbbdefb),
        "03n" => condition("Scattered clouds", "☁", 0x455a64),
        "04d" => condition("Broken clouds", "☁", 0x78909c),
        "04n" => condition("Broken clouds", "☁", 0x37474f),
        "09d" => condition("Shower rain", "☂", 0x4fc3f7),
        "09n" => condition("Shower rain", "☂", 0x0277bd),
        "10d" => condition("Rain (day)", "☂", 0x039be5),
        "10n" => condition("Rain (night)", "☂", 0x01579b),
        "11d" => condition("Thunderstorm", "ϟ", 0x5e35b1),
        "11n" => condition("Thunderstorm", "ϟ", 0x4527a0),
        "13d" => condition("Snow", "❄", 0xe1f5fe),
        "13n" => condition("Snow", "❄", 0xb3e5fc),
        "50d" => condition("Mist", "≡", 0xcfd8dc),
        "50n" => condition("Mist", "≡", 0xb0bec5),
        _ => return None,
    };
    Some(found)
}
