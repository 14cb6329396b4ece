use std::fmt;
use std::time::Duration;
use log::debug;
use ureq::{Agent, Error};
use crate::config::WeatherApiParameters;
use crate::models::weather_api::ForecastPayload;

pub enum WeatherApiError {
    Request(String),
    Document(String),
}

impl fmt::Display for WeatherApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WeatherApiError::Request(e) => write!(f, "WeatherApiError::Request: {}", e),
            WeatherApiError::Document(e) => write!(f, "WeatherApiError::Document: {}", e),
        }
    }
}
impl From<Error> for WeatherApiError {
    fn from(e: Error) -> Self {
        WeatherApiError::Request(e.to_string())
    }
}
impl From<serde_json::Error> for WeatherApiError {
    fn from(e: serde_json::Error) -> Self {
        WeatherApiError::Document(e.to_string())
    }
}

/// Struct for managing forecast retrieval from WeatherAPI
pub struct WeatherApi {
    agent: Agent,
    api_key: String,
    current_url: String,
    forecast_url: String,
    country: String,
    forecast_days: u32,
    aqi: bool,
    alerts: bool,
}

impl WeatherApi {
    /// Returns a WeatherApi struct ready for fetching forecast documents
    ///
    /// # Arguments
    ///
    /// * 'params' - the weather_api section of the configuration
    pub fn new(params: &WeatherApiParameters) -> WeatherApi {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(params.timeout)))
            .build();

        let agent = config.into();

        Self {
            agent,
            api_key: params.api_key.clone(),
            current_url: params.current_url.clone(),
            forecast_url: params.forecast_url.clone(),
            country: params.country.clone(),
            forecast_days: params.forecast_days,
            aqi: params.aqi,
            alerts: params.alerts,
        }
    }

    /// Retrieves the multi-day forecast document for one municipality.
    ///
    /// The document contains the location, the current weather with its
    /// embedded air quality block, and one forecast day per requested day
    /// with an astro block and an array of hourly records.
    ///
    /// A timed out call, a non-2xx status and a body that is not valid
    /// JSON all surface as errors, there is no retry.
    ///
    /// # Arguments
    ///
    /// * 'city_name' - name of the municipality to fetch the forecast for
    pub fn fetch_forecast(&self, city_name: &str) -> Result<ForecastPayload, WeatherApiError> {
        let json = self.agent
            .get(&self.forecast_url)
            .query("key", &self.api_key)
            .query("q", format!("{},{}", city_name, self.country))
            .query("days", self.forecast_days.to_string())
            .query("aqi", yes_no(self.aqi))
            .query("alerts", yes_no(self.alerts))
            .call()?
            .body_mut()
            .read_to_string()?;

        let payload: ForecastPayload = serde_json::from_str(&json)?;

        if let Some(location) = &payload.location {
            debug!("forecast document received for {}",
                location.name.as_deref().unwrap_or(city_name));
        }

        Ok(payload)
    }

    /// Probes the current weather endpoint and returns the HTTP status code.
    ///
    /// Used by the check mode to verify the API key and connectivity, the
    /// response body is not read.
    ///
    /// # Arguments
    ///
    /// * 'city_name' - name of the municipality to probe with
    pub fn check_current(&self, city_name: &str) -> Result<u16, WeatherApiError> {
        let result = self.agent
            .get(&self.current_url)
            .query("key", &self.api_key)
            .query("q", format!("{},{}", city_name, self.country))
            .query("aqi", yes_no(self.aqi))
            .call();

        match result {
            Ok(res) => Ok(res.status().as_u16()),
            Err(Error::StatusCode(code)) => Ok(code),
            Err(e) => Err(WeatherApiError::from(e)),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
