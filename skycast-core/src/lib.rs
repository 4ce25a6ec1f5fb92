//! Core library for the `skycast` weather screen.
//!
//! This crate defines:
//! - Condition classification (provider codes to coarse categories and
//!   background colors)
//! - The screen controller state machine (geolocated fetch, debounced city
//!   search, city selection)
//! - Abstractions over the weather and location providers, with
//!   WeatherAPI.com and IP-geolocation implementations
//! - Configuration & credentials handling
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod screen;

pub use condition::{DayPeriod, DisplayColor, WeatherCategory, classify, color_for};
pub use config::Config;
pub use error::Error;
pub use location::{IpLocator, LocationProvider, PermissionStatus};
pub use model::{CitySelection, Coordinates, Forecast, SearchResult};
pub use provider::{WeatherApiProvider, WeatherProvider};
pub use screen::{FetchOrigin, SEARCH_DEBOUNCE, ScreenController, ScreenEvent, ScreenState};
