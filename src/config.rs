use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct WeatherApiParameters {
    pub api_key: String,
    pub current_url: String,
    pub forecast_url: String,
    pub forecast_days: u32,
    pub aqi: bool,
    pub alerts: bool,
    pub country: String,
    pub timeout: u64,
}

#[derive(Deserialize)]
pub struct CityList {
    pub names: Vec<String>,
}

#[derive(Deserialize)]
pub struct Database {
    pub path: String,
}

#[derive(Deserialize)]
pub struct MailParameters {
    pub smtp_user: String,
    pub smtp_password: String,
    pub smtp_endpoint: String,
    pub from: String,
    pub to: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub weather_api: WeatherApiParameters,
    pub cities: CityList,
    pub database: Database,
    pub mail: Option<MailParameters>,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    Ok(config)
}
