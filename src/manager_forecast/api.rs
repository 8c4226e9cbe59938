use chrono::Local;
use log::{debug, info};
use reqwest::blocking::Client;
use crate::errors::{ParseError, WeatherError};
use crate::manager_forecast::{get_body, WeatherSource};
use crate::models::darksky::ForecastResponse;
use crate::models::forecast::{Coordinates, Forecast, Source, WarningThresholds};

const API_BASE_URL: &str = "https://api.darksky.net/forecast";

/// Sections of the response that are never read
const EXCLUDE: &str = "minutely,hourly,alerts,flags";

/// Forecast source backed by the forecast JSON API
pub struct ApiSource {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ApiSource {
    /// Returns an ApiSource against the public API endpoint
    ///
    /// # Arguments
    ///
    /// * 'client' - http client to use
    /// * 'api_key' - the secret api key
    pub fn new(client: Client, api_key: &str) -> Self {
        Self::with_base_url(client, api_key, API_BASE_URL)
    }

    /// Returns an ApiSource against some other endpoint with the same layout
    ///
    /// # Arguments
    ///
    /// * 'client' - http client to use
    /// * 'api_key' - the secret api key
    /// * 'base_url' - url up to, but not including, the api key path segment
    pub fn with_base_url(client: Client, api_key: &str, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, api_key: &str, coordinates: Coordinates) -> String {
        format!("{}/{}/{}?exclude={}", self.base_url, api_key, coordinates, EXCLUDE)
    }
}

impl WeatherSource for ApiSource {
    fn fetch(&self, coordinates: Coordinates, thresholds: WarningThresholds) -> Result<Forecast, WeatherError> {
        let url = self.url(&self.api_key, coordinates);
        let shown_url = self.url("<api-key>", coordinates);
        info!("requesting forecast from {}", shown_url);

        let body = get_body(&self.client, &url, &shown_url)?;
        debug!("forecast api returned {} bytes", body.len());

        Ok(parse_body(&body, coordinates, thresholds)?)
    }

    fn name(&self) -> &'static str {
        "api"
    }
}

/// Normalizes a forecast API response body.
///
/// Temperatures are rounded to the nearest integer (halves away from zero) while the
/// UV index is truncated. The precipitation probability is kept as is.
///
/// # Arguments
///
/// * 'body' - the JSON response body
/// * 'coordinates' - the point the forecast was requested for
/// * 'thresholds' - warning thresholds to attach
pub fn parse_body(body: &str, coordinates: Coordinates, thresholds: WarningThresholds) -> Result<Forecast, ParseError> {
    let response: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| ParseError::invalid("body", e))?;

    let currently = response.currently
        .ok_or(ParseError::missing("currently"))?;
    let today = response.daily
        .and_then(|d| d.data.into_iter().next())
        .ok_or(ParseError::missing("daily.data[0]"))?;

    let summary_key = today.icon
        .filter(|i| !i.trim().is_empty())
        .ok_or(ParseError::missing("daily.data[0].icon"))?;

    let current_temp = currently.temperature
        .ok_or(ParseError::missing("currently.temperature"))?;
    let feels_like = currently.apparent_temperature
        .ok_or(ParseError::missing("currently.apparentTemperature"))?;
    let precip_probability = currently.precip_probability
        .ok_or(ParseError::missing("currently.precipProbability"))?;
    let low_temp = today.temperature_low
        .ok_or(ParseError::missing("daily.data[0].temperatureLow"))?;
    let high_temp = today.temperature_high
        .ok_or(ParseError::missing("daily.data[0].temperatureHigh"))?;
    let uv_index = today.uv_index
        .ok_or(ParseError::missing("daily.data[0].uvIndex"))?;

    Ok(Forecast {
        coordinates,
        summary_key: summary_key.trim().to_string(),
        current_temp: current_temp.round() as i32,
        feels_like: feels_like.round() as i32,
        low_temp: low_temp.round() as i32,
        high_temp: high_temp.round() as i32,
        uv_index: uv_index.trunc() as i32,
        current_precip_probability: Some(precip_probability),
        source: Source::Api,
        fetched_at: Local::now(),
        thresholds,
    })
}
