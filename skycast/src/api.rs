//! Weather request client
//!
//! One form-encoded `POST` per search. The backend reports failures inside
//! the JSON envelope, so the status code is ignored and the body decides:
//! a truthy `success` carries the weather fields, anything else carries an
//! optional `error` message.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::state::WeatherResult;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/weather";
pub const DEFAULT_ICON_HOST: &str = "openweathermap.org";
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Search failures. `Display` is the text shown on the Error screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Blank city; no request is sent
    #[error("Please enter a city name")]
    EmptyInput,

    /// Transport failure or an undecodable body
    #[error("Failed to fetch weather data: {0}")]
    RequestFailed(String),

    /// The backend answered with a falsy `success`
    #[error("{0}")]
    ApiError(String),
}

impl SearchError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Trim the input; a blank city is rejected before any request is made.
pub fn validate_city(input: &str) -> Result<String, SearchError> {
    let city = input.trim();
    if city.is_empty() {
        Err(SearchError::EmptyInput)
    } else {
        Ok(city.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the lookup endpoint
    pub endpoint: String,
    pub timeout: Duration,
    /// Host used to build icon URLs
    pub icon_host: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
            icon_host: DEFAULT_ICON_HOST.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    endpoint: String,
}

impl WeatherClient {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up the current weather for an already validated city.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn search(&self, city: &str) -> Result<WeatherResult, SearchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("city", city)])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Weather request failed");
                SearchError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;
        debug!(%status, bytes = body.len(), "Weather response received");

        let envelope: Value = serde_json::from_slice(&body)
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;
        parse_envelope(&envelope)
    }
}

/// Success payload as sent by the backend.
#[derive(Debug, Deserialize)]
struct WireWeather {
    city: String,
    country: String,
    temperature: f64,
    description: String,
    icon: String,
    feels_like: f64,
    humidity: f64,
    wind_speed: f64,
    pressure: f64,
    last_updated: String,
}

impl From<WireWeather> for WeatherResult {
    fn from(wire: WireWeather) -> Self {
        WeatherResult {
            city: wire.city,
            country: wire.country,
            temperature: wire.temperature,
            description: wire.description,
            icon_code: wire.icon,
            feels_like: wire.feels_like,
            humidity: wire.humidity,
            wind_speed: wire.wind_speed,
            pressure: wire.pressure,
            last_updated: wire.last_updated,
        }
    }
}

/// Interpret a decoded response envelope.
pub fn parse_envelope(envelope: &Value) -> Result<WeatherResult, SearchError> {
    if envelope.is_null() {
        return Err(SearchError::RequestFailed("empty response".to_string()));
    }

    let success = envelope.get("success").is_some_and(truthy);
    if !success {
        let message = match envelope.get("error") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(other) if truthy(other) => other.to_string(),
            _ => UNKNOWN_ERROR.to_string(),
        };
        return Err(SearchError::ApiError(message));
    }

    WireWeather::deserialize(envelope)
        .map(WeatherResult::from)
        .map_err(|e| SearchError::RequestFailed(format!("invalid weather data: {e}")))
}

/// Loose truthiness of a JSON value: `false`, `null`, `0` and `""` are falsy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn success_body() -> Value {
        json!({
            "success": true,
            "city": "London",
            "country": "GB",
            "temperature": 15,
            "description": "Light rain",
            "icon": "10d",
            "feels_like": 14.2,
            "humidity": 80,
            "wind_speed": 3.6,
            "pressure": 1012,
            "last_updated": "2024-01-01 12:00:00"
        })
    }

    #[test]
    fn test_validate_city_trims() {
        assert_eq!(validate_city("  Paris "), Ok("Paris".to_string()));
        assert_eq!(validate_city(""), Err(SearchError::EmptyInput));
        assert_eq!(validate_city(" \t "), Err(SearchError::EmptyInput));
    }

    #[test]
    fn test_parse_success() {
        let weather = parse_envelope(&success_body()).expect("weather");
        assert_eq!(weather.location(), "London, GB");
        assert_eq!(weather.icon_code, "10d");
        assert_eq!(weather.temperature, 15.0);
        assert_eq!(weather.wind_speed, 3.6);
    }

    #[test]
    fn test_parse_api_error_message() {
        let err = parse_envelope(&json!({"success": false, "error": "City not found"}));
        assert_eq!(err, Err(SearchError::ApiError("City not found".into())));
    }

    #[test]
    fn test_falsy_success_variants_use_fallback() {
        for body in [
            json!({"success": false}),
            json!({"success": null}),
            json!({"success": 0}),
            json!({"success": ""}),
            json!({"error": ""}),
            json!({}),
        ] {
            assert_eq!(
                parse_envelope(&body),
                Err(SearchError::ApiError(UNKNOWN_ERROR.into())),
                "{body}"
            );
        }
    }

    #[test]
    fn test_truthy_success_values() {
        let mut body = success_body();
        body["success"] = json!(1);
        assert!(parse_envelope(&body).is_ok());
        body["success"] = json!("yes");
        assert!(parse_envelope(&body).is_ok());
    }

    #[test]
    fn test_missing_fields_is_request_failure() {
        let err = parse_envelope(&json!({"success": true, "city": "X"}));
        assert!(matches!(err, Err(SearchError::RequestFailed(_))));
    }

    #[test]
    fn test_null_body_is_request_failure() {
        assert!(matches!(
            parse_envelope(&Value::Null),
            Err(SearchError::RequestFailed(_))
        ));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(SearchError::EmptyInput.user_message(), "Please enter a city name");
        assert_eq!(
            SearchError::RequestFailed("timeout".into()).user_message(),
            "Failed to fetch weather data: timeout"
        );
        assert_eq!(
            SearchError::ApiError("City not found".into()).user_message(),
            "City not found"
        );
    }
}
