//! Integration tests for the provider client adapters against a mock HTTP
//! server: success shapes, provider errors, empty geocoding results and
//! malformed payloads.

use skycast_core::{
    DataFetchError, GeoDirectClient, OpenWeatherClient, SuggestionFetchError, SuggestionSource,
    WeatherDataSource,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_current_response() -> serde_json::Value {
    serde_json::json!({
        "name": "London",
        "dt": 1727000000,
        "timezone": 3600,
        "main": {"temp": 18.4, "feels_like": 17.9, "humidity": 62},
        "weather": [{"main": "Clouds", "description": "scattered clouds"}],
        "wind": {"speed": 4.1},
        "visibility": 10000,
        "sys": {"country": "GB", "sunrise": 1726980000, "sunset": 1727024000}
    })
}

fn sample_forecast_response(points: usize) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..points)
        .map(|i| {
            serde_json::json!({
                "dt": 1727000000 + (i as i64) * 10800,
                "main": {"temp": 15.0 + i as f64}
            })
        })
        .collect();
    serde_json::json!({"list": list})
}

fn weather_client(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::with_base_url("TEST_KEY".to_string(), server.uri())
}

fn geo_client(server: &MockServer) -> GeoDirectClient {
    GeoDirectClient::with_base_url("TEST_KEY".to_string(), server.uri())
}

#[tokio::test]
async fn current_weather_success_maps_provider_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .mount(&server)
        .await;

    let weather = weather_client(&server)
        .fetch_current_weather("London")
        .await
        .expect("fetch should succeed");

    assert_eq!(weather.place_name, "London");
    assert_eq!(weather.country, "GB");
    assert_eq!(weather.timezone_offset_secs, 3600);
    assert!((weather.temperature_c - 18.4).abs() < 1e-9);
    assert_eq!(weather.humidity_pct, 62);
    assert_eq!(weather.visibility_m, Some(10000));
    assert_eq!(weather.condition, "Clouds");
    assert_eq!(weather.sunrise.timestamp(), 1726980000);
    assert_eq!(weather.sunset.timestamp(), 1727024000);
}

#[tokio::test]
async fn forecast_success_keeps_full_point_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response(15)))
        .mount(&server)
        .await;

    let forecast = weather_client(&server)
        .fetch_forecast("London")
        .await
        .expect("fetch should succeed");

    // Truncation to chart length is the display layer's job, not the client's.
    assert_eq!(forecast.points.len(), 15);
    assert_eq!(forecast.points[0].at.timestamp(), 1727000000);
    assert!((forecast.points[14].temperature_c - 29.0).abs() < 1e-9);
}

#[tokio::test]
async fn unknown_place_surfaces_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    let err = weather_client(&server)
        .fetch_current_weather("Atlantis")
        .await
        .unwrap_err();

    match err {
        DataFetchError::Provider { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("city not found"));
        }
        other => panic!("expected Provider error, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_weather_payload_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = weather_client(&server)
        .fetch_current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, DataFetchError::Decode(_)));
}

#[tokio::test]
async fn suggestions_success_returns_ordered_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/direct"))
        .and(query_param("q", "Lon"))
        .and(query_param("limit", "5"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "London", "country": "GB", "lat": 51.5, "lon": -0.12},
            {"name": "Londonderry", "country": "GB", "lat": 55.0, "lon": -7.3}
        ])))
        .mount(&server)
        .await;

    let suggestions = geo_client(&server)
        .fetch_suggestions("Lon", 5)
        .await
        .expect("fetch should succeed");

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].name, "London");
    assert_eq!(suggestions[0].country, "GB");
    assert_eq!(suggestions[1].name, "Londonderry");
}

#[tokio::test]
async fn zero_matches_is_an_empty_list_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let suggestions = geo_client(&server)
        .fetch_suggestions("Zzz", 5)
        .await
        .expect("zero matches should not fail");

    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn suggestion_provider_failure_is_typed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/direct"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = geo_client(&server).fetch_suggestions("Lon", 5).await.unwrap_err();

    match err {
        SuggestionFetchError::Provider { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("internal error"));
        }
        other => panic!("expected Provider error, got: {other:?}"),
    }
}

#[tokio::test]
async fn long_error_bodies_are_truncated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503).set_body_string("x".repeat(500)))
        .mount(&server)
        .await;

    let err = weather_client(&server)
        .fetch_current_weather("London")
        .await
        .unwrap_err();

    match err {
        DataFetchError::Provider { body, .. } => {
            assert!(body.len() <= 203);
            assert!(body.ends_with("..."));
        }
        other => panic!("expected Provider error, got: {other:?}"),
    }
}
