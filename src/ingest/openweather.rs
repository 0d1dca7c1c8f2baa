//! OpenWeather current-conditions client.
//!
//! Fetches the current temperature for a city, in metric units, from a
//! configurable endpoint (`https://api.openweathermap.org/data/2.5/weather`
//! in production). One request-building core serves two entry points: a
//! blocking call for the interactive session and an awaitable call for
//! pipelines already running on a tokio runtime.
//!
//! The API key and endpoint come from an explicit [`Config`] constructed
//! at process entry — this module never reads the environment itself.
//!
//! Deviation from the reference behavior, documented per the design notes:
//! clients are built with a bounded request timeout. There is still no
//! retry or backoff; a non-2xx response fails immediately, with HTTP 401
//! classified apart from other failures.

use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;
use crate::model::FetchError;

/// Request timeout for both the blocking and the async client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// OpenWeather API response structures
// ---------------------------------------------------------------------------

/// Current weather response, reduced to the fields this service reads.
/// The full payload carries much more; serde ignores the rest.
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: MainConditions,
}

#[derive(Debug, Deserialize)]
pub struct MainConditions {
    /// Current temperature in the requested units (°C for metric).
    pub temp: f64,
}

// ---------------------------------------------------------------------------
// Request core
// ---------------------------------------------------------------------------

/// Builds the request URL: `{endpoint}?appid=...&q=...&units=metric`,
/// with the key and city percent-encoded.
pub fn build_request_url(config: &Config, city: &str) -> String {
    format!(
        "{}?appid={}&q={}&units=metric",
        config.endpoint_url,
        urlencode(&config.api_key),
        urlencode(city)
    )
}

/// Minimal application/x-www-form-urlencoded escaping for query values.
/// City names carry spaces and non-ASCII letters; everything else is
/// percent-encoded byte-wise.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

/// Maps an HTTP status to the classified fetch error.
/// Returns `None` for 2xx.
fn classify_status(status: u16) -> Option<FetchError> {
    match status {
        200..=299 => None,
        401 => Some(FetchError::Unauthorized),
        other => Some(FetchError::Http(other)),
    }
}

// ---------------------------------------------------------------------------
// Blocking entry point
// ---------------------------------------------------------------------------

/// Fetches the current temperature for `city`, blocking until the
/// response arrives or the timeout fires.
pub fn current_temperature(config: &Config, city: &str) -> Result<f64, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let url = build_request_url(config, city);
    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if let Some(err) = classify_status(response.status().as_u16()) {
        return Err(err);
    }

    let body: CurrentWeatherResponse = response
        .json()
        .map_err(|e| FetchError::Parse(e.to_string()))?;

    Ok(body.main.temp)
}

// ---------------------------------------------------------------------------
// Async entry point
// ---------------------------------------------------------------------------

/// Async variant of [`current_temperature`] for callers already on a
/// tokio runtime. Same URL, same classification, same timeout.
pub async fn current_temperature_async(config: &Config, city: &str) -> Result<f64, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let url = build_request_url(config, city);
    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if let Some(err) = classify_status(response.status().as_u16()) {
        return Err(err);
    }

    let body: CurrentWeatherResponse = response
        .json()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))?;

    Ok(body.main.temp)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
