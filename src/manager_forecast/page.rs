use chrono::Local;
use log::{debug, info};
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use crate::errors::{ParseError, WeatherError};
use crate::manager_forecast::{get_body, WeatherSource};
use crate::models::forecast::{Coordinates, Forecast, Source, WarningThresholds};

const PAGE_BASE_URL: &str = "https://darksky.net/forecast";

/// Forecast source scraping the public forecast page, no api key needed
pub struct PageSource {
    client: Client,
    base_url: String,
}

impl PageSource {
    /// Returns a PageSource against the public forecast page
    ///
    /// # Arguments
    ///
    /// * 'client' - http client to use
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, PAGE_BASE_URL)
    }

    /// Returns a PageSource against some other host serving the same page layout
    ///
    /// # Arguments
    ///
    /// * 'client' - http client to use
    /// * 'base_url' - url up to, but not including, the coordinates path segment
    pub fn with_base_url(client: Client, base_url: &str) -> Self {
        Self { client, base_url: base_url.trim_end_matches('/').to_string() }
    }
}

impl WeatherSource for PageSource {
    fn fetch(&self, coordinates: Coordinates, thresholds: WarningThresholds) -> Result<Forecast, WeatherError> {
        let url = format!("{}/{}/us12/en", self.base_url, coordinates);
        info!("requesting forecast page {}", url);

        let body = get_body(&self.client, &url, &url)?;
        debug!("forecast page returned {} bytes", body.len());

        Ok(parse_page(&body, coordinates, thresholds)?)
    }

    fn name(&self) -> &'static str {
        "page"
    }
}

/// Extracts a forecast from the forecast page.
///
/// The "currently" region holds the summary icon, whose alt text starts with the summary
/// key, and the current temperature. Its "high/low" region holds feels like, low and high.
/// The UV index is read from the current details block further down the page.
///
/// # Arguments
///
/// * 'html' - the page
/// * 'coordinates' - the point the page was requested for
/// * 'thresholds' - warning thresholds to attach
pub fn parse_page(html: &str, coordinates: Coordinates, thresholds: WarningThresholds) -> Result<Forecast, ParseError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let currently = select_first(root, "span.currently", "currently")?;

    let summary_key = select_first(currently, "img", "currently.img")?
        .value()
        .attr("alt")
        .and_then(|alt| alt.split_whitespace().next())
        .ok_or(ParseError::missing("currently.img.alt"))?
        .to_string();

    let summary = text_of(select_first(currently, "span.summary", "currently.summary")?);
    let current_temp = summary
        .split_whitespace()
        .next()
        .ok_or(ParseError::missing("currently.summary"))
        .and_then(|t| parse_degrees(t, "currently.summary"))?;

    let high_low = select_first(currently, "span.summary-high-low", "summary-high-low")?;
    let feels_like = read_degrees(high_low, "span.feels-like-text", "feels-like-text")?;
    let low_temp = read_degrees(high_low, "span.low-temp-text", "low-temp-text")?;
    let high_temp = read_degrees(high_low, "span.high-temp-text", "high-temp-text")?;

    let uv_text = text_of(select_first(root, "#currentDetails div.uv_index span.uv__index__value", "uv__index__value")?);
    let uv_index = uv_text.trim()
        .parse::<i32>()
        .map_err(|e| ParseError::invalid("uv__index__value", format!("'{}': {}", uv_text.trim(), e)))?;

    Ok(Forecast {
        coordinates,
        summary_key,
        current_temp,
        feels_like,
        low_temp,
        high_temp,
        uv_index,
        current_precip_probability: None,
        source: Source::Page,
        fetched_at: Local::now(),
        thresholds,
    })
}

/// Returns the first element under 'scope' matching the css selector
///
/// # Arguments
///
/// * 'scope' - element to search within
/// * 'selector' - css selector
/// * 'field' - name of the field reported if nothing matches
fn select_first<'a>(scope: ElementRef<'a>, selector: &str, field: &str) -> Result<ElementRef<'a>, ParseError> {
    let selector = Selector::parse(selector)
        .map_err(|e| ParseError::invalid(field, format!("bad selector: {}", e)))?;

    let element = scope.select(&selector).next();

    element.ok_or(ParseError::missing(field))
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn read_degrees(scope: ElementRef, selector: &str, field: &str) -> Result<i32, ParseError> {
    let element = select_first(scope, selector, field)?;
    parse_degrees(&text_of(element), field)
}

/// Parses a temperature such as "72°" by dropping any trailing unit characters
///
/// # Arguments
///
/// * 'text' - the text to parse
/// * 'field' - name of the field reported on failure
fn parse_degrees(text: &str, field: &str) -> Result<i32, ParseError> {
    let number = text.trim().trim_end_matches(|c: char| !c.is_ascii_digit());

    number.parse::<i32>()
        .map_err(|e| ParseError::invalid(field, format!("'{}': {}", text.trim(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FetchError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COORDINATES: Coordinates = Coordinates { lat: 38.928766, long: -77.032645 };

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div id="title">
    <span class="currently">
      <img class="skycon" alt="rain icon" src="/images/rain.png">
      <span class="desc swap">
        <span class="summary swap">68˚ Light Rain.</span>
        <span class="summary-high-low">
          <span class="feels-like-text">70˚</span>
          <span class="low-temp-text">60˚</span>
          <span class="high-temp-text">75˚</span>
        </span>
      </span>
    </span>
  </div>
  <div id="currentDetails">
    <div class="wind">
      <span class="num">5</span>
    </div>
    <div class="uv_index">
      <span class="uv__index__value">8</span>
    </div>
  </div>
</body>
</html>"#;

    #[test]
    fn test_parse_page() {
        let forecast = parse_page(PAGE, COORDINATES, WarningThresholds::default()).unwrap();

        assert_eq!(forecast.summary_key, "rain");
        assert_eq!(forecast.current_temp, 68);
        assert_eq!(forecast.feels_like, 70);
        assert_eq!(forecast.low_temp, 60);
        assert_eq!(forecast.high_temp, 75);
        assert_eq!(forecast.uv_index, 8);
        assert_eq!(forecast.current_precip_probability, None);
        assert_eq!(forecast.source, Source::Page);
    }

    #[test]
    fn test_page_and_api_agree() {
        let forecast = parse_page(PAGE, COORDINATES, WarningThresholds::default()).unwrap();
        let api = crate::manager_forecast::api::parse_body(
            r#"{"currently": {"temperature": 68.2, "apparentTemperature": 69.9, "precipProbability": 0.6},
                "daily": {"data": [{"icon": "rain", "temperatureLow": 60.1, "temperatureHigh": 74.8, "uvIndex": 8}]}}"#,
            COORDINATES,
            WarningThresholds::default()).unwrap();

        assert_eq!(forecast.summary_key, api.summary_key);
        assert_eq!(forecast.current_temp, api.current_temp);
        assert_eq!(forecast.feels_like, api.feels_like);
        assert_eq!(forecast.low_temp, api.low_temp);
        assert_eq!(forecast.high_temp, api.high_temp);
        assert_eq!(forecast.uv_index, api.uv_index);
    }

    #[test]
    fn test_negative_and_unit_suffix() {
        assert_eq!(parse_degrees("-5°", "t").unwrap(), -5);
        assert_eq!(parse_degrees(" 72°F ", "t").unwrap(), 72);
        assert_eq!(parse_degrees("72", "t").unwrap(), 72);
        assert!(parse_degrees("°", "t").is_err());
    }

    #[test]
    fn test_missing_region_is_named() {
        let page = PAGE.replace("summary-high-low", "summary-other");
        let err = parse_page(&page, COORDINATES, WarningThresholds::default()).unwrap_err();

        assert_eq!(err.field, "summary-high-low");
    }

    #[test]
    fn test_missing_uv_index() {
        let page = PAGE.replace("currentDetails", "otherDetails");
        let err = parse_page(&page, COORDINATES, WarningThresholds::default()).unwrap_err();

        assert_eq!(err.field, "uv__index__value");
    }

    #[test]
    fn test_missing_alt_text() {
        let page = PAGE.replace(r#"alt="rain icon" "#, "");
        let err = parse_page(&page, COORDINATES, WarningThresholds::default()).unwrap_err();

        assert_eq!(err.field, "currently.img.alt");
    }

    #[test]
    fn test_unparsable_temperature() {
        let page = PAGE.replace("60˚", "low");
        let err = parse_page(&page, COORDINATES, WarningThresholds::default()).unwrap_err();

        assert_eq!(err.field, "low-temp-text");
    }

    #[test]
    fn test_fetch_page() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/forecast/38.928766,-77.032645/us12/en"))
                .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
                .mount(&server)
        );

        let source = PageSource::with_base_url(Client::new(), &format!("{}/forecast", server.uri()));
        let forecast = source.fetch(COORDINATES, WarningThresholds::default()).unwrap();

        assert_eq!(forecast.summary_key, "rain");
    }

    #[test]
    fn test_not_found_page() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(404))
                .mount(&server)
        );

        let source = PageSource::with_base_url(Client::new(), &format!("{}/forecast", server.uri()));
        let err = source.fetch(COORDINATES, WarningThresholds::default()).unwrap_err();

        assert!(matches!(err, WeatherError::Fetch(FetchError::Status { status: 404, .. })));
    }
}
