//! HTTP-level tests for the WeatherAPI.com client against a local mock
//! server.

use skycast_core::{Coordinates, Error, WeatherApiProvider, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "location": { "name": "London", "country": "United Kingdom" },
        "current": {
            "temp_c": 17.3,
            "is_day": 0,
            "condition": { "text": "Partly cloudy", "code": 1003 }
        },
        "forecast": {
            "forecastday": [
                { "day": { "mintemp_c": 11.0, "maxtemp_c": 19.4 } }
            ]
        }
    })
}

#[tokio::test]
async fn forecast_by_coordinates_hits_forecast_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "KEY"))
        .and(query_param("q", "51.5,-0.12"))
        .and(query_param("days", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = WeatherApiProvider::new("KEY".to_string()).with_base_url(server.uri());
    let forecast = provider
        .forecast_by_coordinates(Coordinates { latitude: 51.5, longitude: -0.12 })
        .await
        .expect("forecast must succeed");

    assert_eq!(forecast.location.name, "London");
    assert_eq!(forecast.condition_code, 1003);
    assert!(!forecast.is_day);
    assert_eq!(forecast.max_temp_c, 19.4);
}

#[tokio::test]
async fn forecast_by_name_passes_city_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = WeatherApiProvider::new("KEY".to_string()).with_base_url(server.uri());
    provider.forecast_by_name("Berlin").await.expect("forecast must succeed");
}

#[tokio::test]
async fn search_returns_results_in_provider_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 2801268, "name": "London", "country": "United Kingdom" },
            { "id": 315398, "name": "London", "country": "Canada" }
        ])))
        .mount(&server)
        .await;

    let provider = WeatherApiProvider::new("KEY".to_string()).with_base_url(server.uri());
    let results = provider.search("London").await.expect("search must succeed");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].country, "United Kingdom");
    assert_eq!(results[1].country, "Canada");
}

#[tokio::test]
async fn error_status_maps_to_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"error": {"message": "API key is invalid"}})),
        )
        .mount(&server)
        .await;

    let provider = WeatherApiProvider::new("BAD".to_string()).with_base_url(server.uri());
    let err = provider.forecast_by_name("London").await.unwrap_err();

    assert!(matches!(err, Error::Network(_)));
    assert!(err.to_string().contains("401"));
}
