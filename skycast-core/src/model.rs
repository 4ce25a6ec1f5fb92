use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair as reported by the location provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The place weather is currently displayed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySelection {
    pub name: String,
    pub country: String,
}

/// A candidate returned by city-name search.
///
/// `id` is provider-supplied and used only as a list identity; it is never
/// persisted anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub name: String,
    pub country: String,
}

impl From<SearchResult> for CitySelection {
    fn from(result: SearchResult) -> Self {
        Self { name: result.name, country: result.country }
    }
}

/// A provider-level forecast result: current conditions plus today's
/// min/max, before any flooring or classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub location: CitySelection,
    pub temperature_c: f64,
    pub condition_text: String,
    pub condition_code: i32,
    pub is_day: bool,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub fetched_at: DateTime<Utc>,
}
