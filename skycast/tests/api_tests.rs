//! Weather client against a mock backend

use std::time::Duration;

use serde_json::json;
use skycast::api::{ClientConfig, SearchError, UNKNOWN_ERROR, WeatherClient};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> WeatherClient {
    let config = ClientConfig {
        endpoint: format!("{}/weather", server.uri()),
        timeout: Duration::from_secs(2),
        ..ClientConfig::default()
    };
    WeatherClient::new(&config).unwrap()
}

fn london() -> serde_json::Value {
    json!({
        "success": true,
        "city": "London",
        "country": "GB",
        "temperature": 15,
        "description": "light rain",
        "icon": "10d",
        "feels_like": 14.2,
        "humidity": 80,
        "wind_speed": 3.6,
        "pressure": 1012,
        "last_updated": "2024-01-01 12:00:00"
    })
}

#[tokio::test]
async fn test_search_posts_form_and_decodes_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/weather"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("city=London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london()))
        .expect(1)
        .mount(&server)
        .await;

    let weather = client(&server).search("London").await.unwrap();
    assert_eq!(weather.location(), "London, GB");
    assert_eq!(weather.temperature, 15.0);
    assert_eq!(weather.icon_code, "10d");
    assert_eq!(weather.wind_speed, 3.6);
}

#[tokio::test]
async fn test_city_is_form_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("city=New+York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london()))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client(&server).search("New York").await.is_ok());
}

#[tokio::test]
async fn test_failure_envelope_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "error": "City not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).search("Atlantis").await.unwrap_err();
    assert_eq!(err, SearchError::ApiError("City not found".into()));
    assert_eq!(err.user_message(), "City not found");
}

#[tokio::test]
async fn test_failure_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let err = client(&server).search("Atlantis").await.unwrap_err();
    assert_eq!(err.user_message(), UNKNOWN_ERROR);
}

#[tokio::test]
async fn test_error_status_with_success_body_still_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(london()))
        .mount(&server)
        .await;

    assert!(client(&server).search("London").await.is_ok());
}

#[tokio::test]
async fn test_non_json_body_is_request_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server).search("London").await.unwrap_err();
    assert!(matches!(err, SearchError::RequestFailed(_)));
    assert!(err.user_message().starts_with("Failed to fetch weather data: "));
}

#[tokio::test]
async fn test_timeout_is_request_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(london())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig {
        endpoint: format!("{}/weather", server.uri()),
        timeout: Duration::from_millis(100),
        ..ClientConfig::default()
    };
    let err = WeatherClient::new(&config)
        .unwrap()
        .search("London")
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::RequestFailed(_)));
}
