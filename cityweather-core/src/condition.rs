//! OpenWeather condition codes grouped into the glyphs we display.
//!
//! See <https://openweathermap.org/weather-conditions> for the code taxonomy.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    /// Mist, smoke, haze, dust, fog.
    Atmosphere,
    VolcanicAsh,
    Squall,
    Tornado,
    Clear,
    Clouds,
}

/// Inclusive code ranges, checked in order.
const CONDITION_TABLE: &[(i64, i64, Condition)] = &[
    (200, 232, Condition::Thunderstorm),
    (300, 321, Condition::Drizzle),
    (500, 531, Condition::Rain),
    (600, 622, Condition::Snow),
    (701, 741, Condition::Atmosphere),
    (762, 762, Condition::VolcanicAsh),
    (771, 771, Condition::Squall),
    (781, 781, Condition::Tornado),
    (800, 800, Condition::Clear),
    (801, 804, Condition::Clouds),
];

impl Condition {
    pub fn from_code(code: i64) -> Option<Self> {
        CONDITION_TABLE
            .iter()
            .find(|(lo, hi, _)| (*lo..=*hi).contains(&code))
            .map(|(_, _, condition)| *condition)
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Condition::Thunderstorm => "⛈️",
            Condition::Drizzle => "🌦️",
            Condition::Rain => "🌧️",
            Condition::Snow => "🌨️",
            Condition::Atmosphere => "🌫️",
            Condition::VolcanicAsh => "🌋",
            Condition::Squall => "💨",
            Condition::Tornado => "🌪️",
            Condition::Clear => "☀️",
            Condition::Clouds => "☁️",
        }
    }
}

/// Glyph for a weather code; empty for codes outside the table.
pub fn emoji(code: i64) -> &'static str {
    Condition::from_code(code).map_or("", |c| c.emoji())
}
