use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    error::Error,
    model::{Coordinates, Forecast, SearchResult},
};

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// Abstract weather data source.
///
/// The screen controller only talks to this trait; tests substitute their
/// own implementations.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions plus today's min/max for a coordinate pair.
    async fn forecast_by_coordinates(&self, coords: Coordinates) -> Result<Forecast, Error>;

    /// Same shape, looked up by city name.
    async fn forecast_by_name(&self, name: &str) -> Result<Forecast, Error>;

    /// City-name search; results keep the provider's ordering.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, Error>;
}
