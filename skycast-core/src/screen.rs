//! The weather screen controller.
//!
//! Owns the single `ScreenState` and mutates it in response to three
//! triggers: initialization (geolocated fetch), query changes (debounced
//! city search) and city selection (named fetch). Network work runs on
//! spawned tasks that report back over a channel; results are applied in
//! issuance order via monotonic sequence numbers, so a stale response can
//! never overwrite a newer one regardless of completion order.

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle, time};
use tracing::{debug, warn};

use crate::{
    condition::{DayPeriod, DisplayColor, WeatherCategory, classify, color_for},
    error::Error,
    location::{LocationProvider, PermissionStatus},
    model::{CitySelection, Coordinates, Forecast, SearchResult},
    provider::WeatherProvider,
};

/// Quiescence required before a query change turns into a search call.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Everything the screen renders from.
#[derive(Debug, Clone)]
pub struct ScreenState {
    pub is_searching: bool,
    pub query: String,
    pub filtered_cities: Vec<SearchResult>,
    pub selected_city: Option<CitySelection>,
    pub temperature_c: Option<i32>,
    pub min_temperature_c: Option<i32>,
    pub max_temperature_c: Option<i32>,
    pub condition: Option<String>,
    pub generalized: Option<WeatherCategory>,
    pub background: DisplayColor,
    pub error_message: Option<String>,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self {
            is_searching: false,
            query: String::new(),
            filtered_cities: Vec::new(),
            selected_city: None,
            temperature_c: None,
            min_temperature_c: None,
            max_temperature_c: None,
            condition: None,
            generalized: None,
            background: DisplayColor::NEUTRAL,
            error_message: None,
        }
    }
}

/// What kind of trigger issued a forecast fetch.
///
/// Geolocated fetches adopt the response's location as the selected city;
/// selection fetches keep the city the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    Geolocation,
    Selection,
}

/// A background task reporting back to the controller.
#[derive(Debug)]
pub enum ScreenEvent {
    SearchFinished { seq: u64, outcome: Result<Vec<SearchResult>, Error> },
    WeatherFinished { seq: u64, origin: FetchOrigin, outcome: Result<Forecast, Error> },
}

enum FetchTarget {
    Coordinates(Coordinates),
    Name(String),
}

pub struct ScreenController {
    provider: Arc<dyn WeatherProvider>,
    locator: Arc<dyn LocationProvider>,
    state: ScreenState,
    debounce: Duration,
    events_tx: mpsc::UnboundedSender<ScreenEvent>,
    events_rx: mpsc::UnboundedReceiver<ScreenEvent>,
    /// The single pending debounce timer; replaced (and the old one
    /// aborted) on every keystroke.
    debounce_task: Option<JoinHandle<()>>,
    search_seq: u64,
    search_applied: u64,
    fetch_seq: u64,
    fetch_applied: u64,
    pending_fetches: usize,
}

impl ScreenController {
    pub fn new(provider: Arc<dyn WeatherProvider>, locator: Arc<dyn LocationProvider>) -> Self {
        Self::with_debounce(provider, locator, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(
        provider: Arc<dyn WeatherProvider>,
        locator: Arc<dyn LocationProvider>,
        debounce: Duration,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            provider,
            locator,
            state: ScreenState::default(),
            debounce,
            events_tx,
            events_rx,
            debounce_task: None,
            search_seq: 0,
            search_applied: 0,
            fetch_seq: 0,
            fetch_applied: 0,
            pending_fetches: 0,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Trigger A: acquire the device location and fetch weather for it.
    ///
    /// A denied permission or failed position lookup sets the error message
    /// and issues no weather fetch; the screen stays interactive.
    pub async fn initialize(&mut self) {
        match self.locator.request_permission().await {
            Ok(PermissionStatus::Granted) => {}
            Ok(PermissionStatus::Denied) => {
                self.state.error_message = Some(Error::PermissionDenied.to_string());
                return;
            }
            Err(e) => {
                self.state.error_message = Some(e.to_string());
                return;
            }
        }

        let coords = match self.locator.current_position().await {
            Ok(coords) => coords,
            Err(e) => {
                self.state.error_message = Some(e.to_string());
                return;
            }
        };

        self.spawn_fetch(FetchOrigin::Geolocation, FetchTarget::Coordinates(coords));
    }

    /// Trigger B: the search text changed.
    ///
    /// The raw text is stored immediately; the actual search is issued only
    /// after `debounce` of quiescence, carrying the next sequence number.
    /// Empty text clears the result list without any network call.
    pub fn query_changed(&mut self, text: &str) {
        self.state.query = text.to_string();

        if let Some(handle) = self.debounce_task.take() {
            handle.abort();
        }

        self.search_seq += 1;
        let seq = self.search_seq;

        if text.is_empty() {
            self.search_applied = seq;
            self.state.filtered_cities.clear();
            return;
        }

        let provider = Arc::clone(&self.provider);
        let tx = self.events_tx.clone();
        let query = text.to_string();
        let debounce = self.debounce;

        self.debounce_task = Some(tokio::spawn(async move {
            time::sleep(debounce).await;
            let outcome = provider.search(&query).await;
            let _ = tx.send(ScreenEvent::SearchFinished { seq, outcome });
        }));
    }

    /// Trigger C: the user picked a city.
    ///
    /// Search state is cleared synchronously, any in-flight search is
    /// invalidated, and a forecast fetch for the city's name is issued.
    pub fn select_city(&mut self, city: CitySelection) {
        self.state.query.clear();
        self.state.filtered_cities.clear();
        self.state.is_searching = false;
        self.cancel_pending_search();

        self.state.selected_city = Some(city.clone());
        self.spawn_fetch(FetchOrigin::Selection, FetchTarget::Name(city.name));
    }

    /// Toggle search mode. Leaving it discards the query, the result list
    /// and any pending search.
    pub fn set_searching(&mut self, searching: bool) {
        self.state.is_searching = searching;
        if !searching {
            self.state.query.clear();
            self.state.filtered_cities.clear();
            self.cancel_pending_search();
        }
    }

    /// Apply one background result to the state.
    ///
    /// Events whose sequence number is not greater than the last applied
    /// one for their kind are discarded: last write wins by issuance time,
    /// not completion time.
    pub fn handle_event(&mut self, event: ScreenEvent) {
        match event {
            ScreenEvent::SearchFinished { seq, outcome } => {
                if seq <= self.search_applied {
                    debug!(seq, applied = self.search_applied, "discarding superseded search");
                    return;
                }
                self.search_applied = seq;

                match outcome {
                    Ok(results) => self.state.filtered_cities = results,
                    Err(e) => {
                        warn!(error = %e, "city search failed");
                        self.state.error_message = Some(e.to_string());
                    }
                }
            }
            ScreenEvent::WeatherFinished { seq, origin, outcome } => {
                self.pending_fetches = self.pending_fetches.saturating_sub(1);
                if seq <= self.fetch_applied {
                    debug!(seq, applied = self.fetch_applied, "discarding superseded forecast");
                    return;
                }
                self.fetch_applied = seq;

                match outcome {
                    Ok(forecast) => self.apply_forecast(origin, forecast),
                    Err(e) => {
                        warn!(error = %e, "weather fetch failed");
                        // Prior weather, if any, stays rendered next to the error.
                        self.state.error_message = Some(e.to_string());
                    }
                }
            }
        }
    }

    /// Await the next background result. Long-lived front ends select over
    /// this and their input source, then pass the event to `handle_event`.
    pub async fn next_event(&mut self) -> Option<ScreenEvent> {
        self.events_rx.recv().await
    }

    /// Drive all outstanding work (pending debounce, in-flight fetches) to
    /// completion and apply the results. One-shot front ends call this
    /// after a trigger instead of running an event loop.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.debounce_task.take() {
            let _ = handle.await;
        }

        while self.pending_fetches > 0 {
            match self.events_rx.recv().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }

        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn cancel_pending_search(&mut self) {
        if let Some(handle) = self.debounce_task.take() {
            handle.abort();
        }
        self.search_applied = self.search_seq;
    }

    fn spawn_fetch(&mut self, origin: FetchOrigin, target: FetchTarget) {
        self.fetch_seq += 1;
        let seq = self.fetch_seq;
        let provider = Arc::clone(&self.provider);
        let tx = self.events_tx.clone();
        self.pending_fetches += 1;

        tokio::spawn(async move {
            let outcome = match target {
                FetchTarget::Coordinates(coords) => provider.forecast_by_coordinates(coords).await,
                FetchTarget::Name(name) => provider.forecast_by_name(&name).await,
            };
            let _ = tx.send(ScreenEvent::WeatherFinished { seq, origin, outcome });
        });
    }

    fn apply_forecast(&mut self, origin: FetchOrigin, forecast: Forecast) {
        if origin == FetchOrigin::Geolocation {
            self.state.selected_city = Some(forecast.location.clone());
        }

        let period = DayPeriod::from_is_day(forecast.is_day);
        let category = classify(forecast.condition_code, period);

        self.state.temperature_c = Some(forecast.temperature_c.floor() as i32);
        self.state.min_temperature_c = Some(forecast.min_temp_c.floor() as i32);
        self.state.max_temperature_c = Some(forecast.max_temp_c.floor() as i32);
        self.state.condition = Some(forecast.condition_text);
        self.state.generalized = Some(category);
        self.state.background = color_for(category, period);
        self.state.error_message = None;
    }
}
