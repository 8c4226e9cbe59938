pub mod api;
pub mod page;

use std::time::Duration;
use log::warn;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use crate::config::Config;
use crate::errors::{FetchError, WeatherError};
use crate::manager_forecast::api::ApiSource;
use crate::manager_forecast::page::PageSource;
use crate::models::forecast::{Coordinates, Forecast, WarningThresholds};

/// A place to get a forecast from
pub trait WeatherSource {
    /// Fetches and normalizes a forecast, performing exactly one request
    ///
    /// # Arguments
    ///
    /// * 'coordinates' - the point to get a forecast for
    /// * 'thresholds' - warning thresholds to attach to the forecast
    fn fetch(&self, coordinates: Coordinates, thresholds: WarningThresholds) -> Result<Forecast, WeatherError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Returns a blocking http client with the given timeout
///
/// # Arguments
///
/// * 'timeout_secs' - global timeout for each request
pub fn http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("weatherink/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Picks the weather source given configuration.
///
/// The API is used only when asked for and an api key is at hand, otherwise the public
/// forecast page is scraped.
///
/// # Arguments
///
/// * 'config' - the configuration
/// * 'client' - http client to use for the request
/// * 'scrape_only' - never query the API regardless of configuration
pub fn select_source(config: &Config, client: Client, scrape_only: bool) -> Box<dyn WeatherSource> {
    let query_api = config.app.query_api && !scrape_only;

    match (query_api, config.api_key()) {
        (true, Some(api_key)) => Box::new(ApiSource::new(client, api_key)),
        (true, None) => {
            warn!("fetching data from the forecast page instead of the API since no api key was given");
            Box::new(PageSource::new(client))
        },
        (false, _) => Box::new(PageSource::new(client)),
    }
}

/// Sends a GET request and returns the body if the status is 200
///
/// # Arguments
///
/// * 'client' - the http client
/// * 'url' - url to get
/// * 'shown_url' - the url as it may appear in errors and logs
fn get_body(client: &Client, url: &str, shown_url: &str) -> Result<String, FetchError> {
    let res: Response = client
        .get(url)
        .send()
        .map_err(|e| FetchError::Transport { url: shown_url.to_string(), reason: e.without_url().to_string() })?;

    if res.status() != StatusCode::OK {
        return Err(FetchError::Status { status: res.status().as_u16(), url: shown_url.to_string() });
    }

    res.text()
        .map_err(|e| FetchError::Transport { url: shown_url.to_string(), reason: e.without_url().to_string() })
}
