use std::fmt;
use std::fmt::Formatter;
use std::io;
use crate::manager_mail::errors::MailError;
use crate::manager_warehouse::errors::WarehouseError;
use crate::manager_weather_api::WeatherApiError;
use crate::mapping::MappingError;

pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError(e.to_string())
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError(e.to_string())
    }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self {
        ConfigError(e.to_string())
    }
}

pub struct SkyfeedInitError(pub String);

impl fmt::Display for SkyfeedInitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SkyfeedInitError: {}", self.0)
    }
}
impl From<WarehouseError> for SkyfeedInitError {
    fn from(e: WarehouseError) -> Self {
        SkyfeedInitError(e.to_string())
    }
}
impl From<MailError> for SkyfeedInitError {
    fn from(e: MailError) -> Self { SkyfeedInitError(e.to_string()) }
}
impl From<io::Error> for SkyfeedInitError {
    fn from(e: io::Error) -> Self {
        SkyfeedInitError(e.to_string())
    }
}
impl From<log::SetLoggerError> for SkyfeedInitError {
    fn from(e: log::SetLoggerError) -> Self {
        SkyfeedInitError(e.to_string())
    }
}
impl From<log4rs::config::runtime::ConfigErrors> for SkyfeedInitError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self {
        SkyfeedInitError(e.to_string())
    }
}

/// Error that aborts a whole pipeline run, as opposed to failing a single
/// municipality iteration
#[derive(Debug)]
pub struct SkyfeedRunError(pub String);

impl fmt::Display for SkyfeedRunError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SkyfeedRunError: {}", self.0)
    }
}
impl From<WarehouseError> for SkyfeedRunError {
    fn from(e: WarehouseError) -> Self {
        SkyfeedRunError(e.to_string())
    }
}

/// Error that fails a single municipality iteration. Fetch covers timeouts,
/// non-2xx responses and malformed JSON, Mapping covers missing or malformed
/// timestamps, Warehouse covers non-duplicate insert failures.
pub enum IngestError {
    Fetch(WeatherApiError),
    Mapping(MappingError),
    Warehouse(WarehouseError),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Fetch(e) => write!(f, "{}", e),
            IngestError::Mapping(e) => write!(f, "{}", e),
            IngestError::Warehouse(e) => write!(f, "{}", e),
        }
    }
}
impl From<WeatherApiError> for IngestError {
    fn from(e: WeatherApiError) -> Self {
        IngestError::Fetch(e)
    }
}
impl From<MappingError> for IngestError {
    fn from(e: MappingError) -> Self {
        IngestError::Mapping(e)
    }
}
impl From<WarehouseError> for IngestError {
    fn from(e: WarehouseError) -> Self {
        IngestError::Warehouse(e)
    }
}
