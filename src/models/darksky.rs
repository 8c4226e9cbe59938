use serde::Deserialize;

#[derive(Deserialize)]
pub struct Currently {
    pub temperature: Option<f64>,
    #[serde(rename = "apparentTemperature")]
    pub apparent_temperature: Option<f64>,
    #[serde(rename = "precipProbability")]
    pub precip_probability: Option<f64>,
}

#[derive(Deserialize)]
pub struct DailyData {
    pub icon: Option<String>,
    #[serde(rename = "temperatureLow")]
    pub temperature_low: Option<f64>,
    #[serde(rename = "temperatureHigh")]
    pub temperature_high: Option<f64>,
    #[serde(rename = "uvIndex")]
    pub uv_index: Option<f64>,
}

#[derive(Deserialize)]
pub struct Daily {
    #[serde(default)]
    pub data: Vec<DailyData>,
}

/// The parts of a forecast API response that are read, everything else is ignored
#[derive(Deserialize)]
pub struct ForecastResponse {
    pub currently: Option<Currently>,
    pub daily: Option<Daily>,
}
