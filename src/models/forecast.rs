use std::fmt;
use std::fmt::Formatter;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

const SUN_ICON: char = '\u{f185}';
const MOON_ICON: char = '\u{f186}';
const CLOUD_ICON: char = '\u{f0c2}';
const CLOUD_MOON_ICON: char = '\u{f6c3}';
const RAIN_ICON: char = '\u{f73d}';
const SNOWFLAKE_ICON: char = '\u{f2dc}';
const WIND_ICON: char = '\u{f72e}';
const SMOG_ICON: char = '\u{f75f}';
pub const QUESTION_ICON: char = '\u{f128}';

/// Latitude/longitude pair in decimal degrees
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

/// Washington, DC
impl Default for Coordinates {
    fn default() -> Self {
        Self { lat: 38.928766, long: -77.032645 }
    }
}

/// Prints as "lat,long", the form both the API and the forecast page expect in their paths
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{},{}", decimal(self.lat), decimal(self.long))
    }
}

/// Thresholds for the derived warnings on a forecast
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct WarningThresholds {
    pub uv: i32,
    pub precipitation: f64,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self { uv: 7, precipitation: 0.5 }
    }
}

/// Where a forecast came from
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Api,
    Page,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Source::Api  => write!(f, "api"),
            Source::Page => write!(f, "page"),
        }
    }
}

/// Normalized weather for one location, integers in degrees Fahrenheit
#[derive(Clone, Debug)]
pub struct Forecast {
    pub coordinates: Coordinates,
    pub summary_key: String,
    pub current_temp: i32,
    pub feels_like: i32,
    pub low_temp: i32,
    pub high_temp: i32,
    pub uv_index: i32,
    pub current_precip_probability: Option<f64>,
    pub source: Source,
    pub fetched_at: DateTime<Local>,
    pub thresholds: WarningThresholds,
}

impl Forecast {
    /// True when the UV index meets or exceeds the warning threshold
    pub fn is_uv_warning(&self) -> bool {
        self.uv_index >= self.thresholds.uv
    }

    /// True when the precipitation probability is known and at or above the threshold
    pub fn precipitation_is_likely(&self) -> bool {
        self.current_precip_probability
            .is_some_and(|p| p >= self.thresholds.precipitation)
    }

    /// Returns the Font Awesome glyph for the summary key, or a question mark glyph
    /// for keys not in the table
    pub fn sky_icon(&self) -> char {
        sky_icon(&self.summary_key)
    }
}

/// Maps a summary key to its display glyph
///
/// # Arguments
///
/// * 'summary_key' - sky condition token as given by the weather source
pub fn sky_icon(summary_key: &str) -> char {
    match summary_key {
        "clear-day"           => SUN_ICON,
        "clear-night"         => MOON_ICON,
        "partly-cloudy-day"   => CLOUD_ICON,
        "partly-cloudy-night" => CLOUD_MOON_ICON,
        "cloudy"              => CLOUD_ICON,
        "rain"                => RAIN_ICON,
        "sleet"               => SNOWFLAKE_ICON,
        "snow"                => SNOWFLAKE_ICON,
        "wind"                => WIND_ICON,
        "fog"                 => SMOG_ICON,
        _                     => QUESTION_ICON,
    }
}

/// Formats a float in its shortest round-trip form but always with a fractional part,
/// i.e. 0.6 stays "0.6" while 1 becomes "1.0"
///
/// # Arguments
///
/// * 'value' - the value to format
pub fn decimal(value: f64) -> String {
    let s = value.to_string();
    if value.is_finite() && !s.contains('.') && !s.contains('e') {
        format!("{}.0", s)
    } else {
        s
    }
}
