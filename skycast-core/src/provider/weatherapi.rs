use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::Error,
    model::{CitySelection, Coordinates, Forecast, SearchResult},
};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// WeatherAPI.com client: forecast.json for conditions, search.json for
/// city lookup.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Point the client at a different host (integration tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_forecast(&self, q: &str) -> Result<Forecast, Error> {
        let url = format!("{}/forecast.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", q), ("days", "1")])
            .send()
            .await
            .map_err(|e| {
                Error::network(format!("Failed to send request to WeatherAPI.com (forecast): {e}"))
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read WeatherAPI forecast body: {e}")))?;

        if !status.is_success() {
            return Err(Error::network(format!(
                "WeatherAPI forecast request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        parse_forecast(&body)
    }

    async fn fetch_search(&self, query: &str) -> Result<Vec<SearchResult>, Error> {
        let url = format!("{}/search.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", query)])
            .send()
            .await
            .map_err(|e| {
                Error::network(format!("Failed to send request to WeatherAPI.com (search): {e}"))
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read WeatherAPI search body: {e}")))?;

        if !status.is_success() {
            return Err(Error::network(format!(
                "WeatherAPI search request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        parse_search(&body)
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    code: i32,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    is_day: u8,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    mintemp_c: f64,
    maxtemp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

#[derive(Debug, Deserialize)]
struct WaSearchEntry {
    id: i64,
    name: String,
    country: String,
}

/// Parse a forecast.json body. Missing fields are a network-level failure.
fn parse_forecast(body: &str) -> Result<Forecast, Error> {
    let parsed: WaForecastResponse = serde_json::from_str(body)
        .map_err(|e| Error::network(format!("Failed to parse WeatherAPI forecast JSON: {e}")))?;

    let day = parsed
        .forecast
        .forecastday
        .first()
        .ok_or_else(|| Error::network("WeatherAPI response contained no forecastday data"))?;

    Ok(Forecast {
        location: CitySelection { name: parsed.location.name, country: parsed.location.country },
        temperature_c: parsed.current.temp_c,
        condition_text: parsed.current.condition.text,
        condition_code: parsed.current.condition.code,
        is_day: parsed.current.is_day == 1,
        min_temp_c: day.day.mintemp_c,
        max_temp_c: day.day.maxtemp_c,
        fetched_at: Utc::now(),
    })
}

/// Parse a search.json body, keeping the provider's result order.
fn parse_search(body: &str) -> Result<Vec<SearchResult>, Error> {
    let parsed: Vec<WaSearchEntry> = serde_json::from_str(body)
        .map_err(|e| Error::network(format!("Failed to parse WeatherAPI search JSON: {e}")))?;

    Ok(parsed
        .into_iter()
        .map(|e| SearchResult { id: e.id, name: e.name, country: e.country })
        .collect())
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn forecast_by_coordinates(&self, coords: Coordinates) -> Result<Forecast, Error> {
        let q = format!("{},{}", coords.latitude, coords.longitude);
        self.fetch_forecast(&q).await
    }

    async fn forecast_by_name(&self, name: &str) -> Result<Forecast, Error> {
        self.fetch_forecast(name).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, Error> {
        self.fetch_search(query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
