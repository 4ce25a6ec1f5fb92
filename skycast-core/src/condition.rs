//! Condition classification: WeatherAPI.com condition codes to coarse
//! categories, and categories to background colors.
//!
//! Both functions are pure lookups. The per-period tables are scanned in
//! declaration order and the first set containing the code wins; that order
//! is part of the contract. Codes 1279 and 1282 ("possible snow showers")
//! appear in both the stormy and snowy sets, and stormy is declared first,
//! so they classify as stormy.

use std::fmt;

/// Day/night flag for the queried location.
///
/// Comes from the weather provider's own `is_day` indicator, never from the
/// device clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Day,
    Night,
}

impl DayPeriod {
    pub fn from_is_day(is_day: bool) -> Self {
        if is_day { DayPeriod::Day } else { DayPeriod::Night }
    }
}

/// Coarse weather bucket derived from a provider condition code.
///
/// `Sunny` only occurs during the day and `Clear` only at night; the other
/// categories are shared between both periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCategory {
    Sunny,
    Clear,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    Foggy,
    Unknown,
}

impl WeatherCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCategory::Sunny => "sunny",
            WeatherCategory::Clear => "clear",
            WeatherCategory::Cloudy => "cloudy",
            WeatherCategory::Rainy => "rainy",
            WeatherCategory::Stormy => "stormy",
            WeatherCategory::Snowy => "snowy",
            WeatherCategory::Foggy => "foggy",
            WeatherCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An RGB background color, rendered as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Neutral background shown before the first forecast arrives.
    pub const NEUTRAL: DisplayColor = WHITE;
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

const GOLD: DisplayColor = DisplayColor::new(0xFF, 0xD7, 0x00);
const LIGHT_STEEL_BLUE: DisplayColor = DisplayColor::new(0xB0, 0xC4, 0xDE);
const LIGHT_SKY_BLUE: DisplayColor = DisplayColor::new(0x87, 0xCE, 0xFA);
const LIGHT_SLATE_GRAY: DisplayColor = DisplayColor::new(0x77, 0x88, 0x99);
const WHITE: DisplayColor = DisplayColor::new(0xFF, 0xFF, 0xFF);
const LIGHT_GRAY: DisplayColor = DisplayColor::new(0xD3, 0xD3, 0xD3);
const MIDNIGHT_BLUE: DisplayColor = DisplayColor::new(0x19, 0x19, 0x70);
const DARK_SLATE_GRAY: DisplayColor = DisplayColor::new(0x2F, 0x4F, 0x4F);
const STEEL_BLUE: DisplayColor = DisplayColor::new(0x46, 0x82, 0xB4);
const POWDER_BLUE: DisplayColor = DisplayColor::new(0xB0, 0xE0, 0xE6);
const DIM_GRAY: DisplayColor = DisplayColor::new(0x69, 0x69, 0x69);
const BLACK: DisplayColor = DisplayColor::new(0x00, 0x00, 0x00);

const RAINY_CODES: &[i32] = &[
    1063, 1180, 1183, 1186, 1189, 1192, 1195, 1198, 1201, 1240, 1243, 1246, 1273, 1276,
];
const STORMY_CODES: &[i32] = &[1087, 1279, 1282];
const SNOWY_CODES: &[i32] = &[
    1066, 1069, 1072, 1114, 1117, 1147, 1210, 1213, 1216, 1219, 1222, 1225, 1237, 1249, 1252,
    1255, 1258, 1261, 1264, 1279, 1282,
];
const CLOUDY_CODES: &[i32] = &[1003, 1006, 1009];
const FOGGY_CODES: &[i32] = &[1030, 1135];
const CLEAR_CODES: &[i32] = &[1000];

// Declaration order is significant: first set containing the code wins.
const DAY_TABLE: &[(WeatherCategory, &[i32])] = &[
    (WeatherCategory::Sunny, CLEAR_CODES),
    (WeatherCategory::Cloudy, CLOUDY_CODES),
    (WeatherCategory::Rainy, RAINY_CODES),
    (WeatherCategory::Stormy, STORMY_CODES),
    (WeatherCategory::Snowy, SNOWY_CODES),
    (WeatherCategory::Foggy, FOGGY_CODES),
];

const NIGHT_TABLE: &[(WeatherCategory, &[i32])] = &[
    (WeatherCategory::Clear, CLEAR_CODES),
    (WeatherCategory::Cloudy, CLOUDY_CODES),
    (WeatherCategory::Rainy, RAINY_CODES),
    (WeatherCategory::Stormy, STORMY_CODES),
    (WeatherCategory::Snowy, SNOWY_CODES),
    (WeatherCategory::Foggy, FOGGY_CODES),
];

/// Map a provider condition code to its generalized category.
///
/// Total over all codes: anything absent from every set is `Unknown`.
pub fn classify(code: i32, period: DayPeriod) -> WeatherCategory {
    let table = match period {
        DayPeriod::Day => DAY_TABLE,
        DayPeriod::Night => NIGHT_TABLE,
    };

    table
        .iter()
        .find(|(_, codes)| codes.contains(&code))
        .map(|(category, _)| *category)
        .unwrap_or(WeatherCategory::Unknown)
}

/// Background color for a (category, period) pair.
///
/// Total: categories not present in the period's palette (`Clear` during
/// the day, `Sunny` at night, `Unknown`) fall back to the period's unknown
/// color.
pub fn color_for(category: WeatherCategory, period: DayPeriod) -> DisplayColor {
    match period {
        DayPeriod::Day => match category {
            WeatherCategory::Sunny => GOLD,
            WeatherCategory::Cloudy => LIGHT_STEEL_BLUE,
            WeatherCategory::Rainy => LIGHT_SKY_BLUE,
            WeatherCategory::Stormy => LIGHT_SLATE_GRAY,
            WeatherCategory::Snowy => WHITE,
            WeatherCategory::Foggy => LIGHT_GRAY,
            _ => WHITE,
        },
        DayPeriod::Night => match category {
            WeatherCategory::Clear => MIDNIGHT_BLUE,
            WeatherCategory::Cloudy => DARK_SLATE_GRAY,
            WeatherCategory::Rainy => STEEL_BLUE,
            WeatherCategory::Stormy => DARK_SLATE_GRAY,
            WeatherCategory::Snowy => POWDER_BLUE,
            WeatherCategory::Foggy => DIM_GRAY,
            _ => BLACK,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CATEGORIES: &[WeatherCategory] = &[
        WeatherCategory::Sunny,
        WeatherCategory::Clear,
        WeatherCategory::Cloudy,
        WeatherCategory::Rainy,
        WeatherCategory::Stormy,
        WeatherCategory::Snowy,
        WeatherCategory::Foggy,
        WeatherCategory::Unknown,
    ];

    #[test]
    fn clear_sky_depends_on_period() {
        assert_eq!(classify(1000, DayPeriod::Day), WeatherCategory::Sunny);
        assert_eq!(classify(1000, DayPeriod::Night), WeatherCategory::Clear);
    }

    #[test]
    fn every_listed_code_maps_to_its_category() {
        for &(category, codes) in DAY_TABLE {
            for &code in codes {
                let got = classify(code, DayPeriod::Day);
                // Overlapping codes resolve to the earlier declaration.
                if code == 1279 || code == 1282 {
                    assert_eq!(got, WeatherCategory::Stormy);
                } else {
                    assert_eq!(got, category, "code {code}");
                }
            }
        }
    }

    #[test]
    fn unlisted_codes_are_unknown() {
        for code in [0, -1, 999, 1001, 1283, 9999] {
            assert_eq!(classify(code, DayPeriod::Day), WeatherCategory::Unknown);
            assert_eq!(classify(code, DayPeriod::Night), WeatherCategory::Unknown);
        }
    }

    #[test]
    fn possible_snow_showers_classify_as_stormy() {
        assert_eq!(classify(1282, DayPeriod::Day), WeatherCategory::Stormy);
        assert_eq!(classify(1279, DayPeriod::Day), WeatherCategory::Stormy);
        assert_eq!(classify(1282, DayPeriod::Night), WeatherCategory::Stormy);
        assert_eq!(
            color_for(classify(1282, DayPeriod::Day), DayPeriod::Day).to_string(),
            "#778899"
        );
    }

    #[test]
    fn classify_is_deterministic() {
        for code in [1000, 1063, 1282, 42] {
            assert_eq!(classify(code, DayPeriod::Day), classify(code, DayPeriod::Day));
        }
    }

    #[test]
    fn color_lookup_is_total_with_fallbacks() {
        for &category in ALL_CATEGORIES {
            // Must return *something* for every combination.
            let _ = color_for(category, DayPeriod::Day);
            let _ = color_for(category, DayPeriod::Night);
        }

        // Cross-period categories hit the unknown fallback.
        assert_eq!(color_for(WeatherCategory::Clear, DayPeriod::Day).to_string(), "#FFFFFF");
        assert_eq!(color_for(WeatherCategory::Sunny, DayPeriod::Night).to_string(), "#000000");
        assert_eq!(color_for(WeatherCategory::Unknown, DayPeriod::Day).to_string(), "#FFFFFF");
        assert_eq!(color_for(WeatherCategory::Unknown, DayPeriod::Night).to_string(), "#000000");
    }

    #[test]
    fn sample_palette_entries() {
        assert_eq!(color_for(WeatherCategory::Sunny, DayPeriod::Day).to_string(), "#FFD700");
        assert_eq!(color_for(WeatherCategory::Clear, DayPeriod::Night).to_string(), "#191970");
        assert_eq!(color_for(WeatherCategory::Rainy, DayPeriod::Night).to_string(), "#4682B4");
        assert_eq!(color_for(WeatherCategory::Snowy, DayPeriod::Night).to_string(), "#B0E0E6");
    }
}
