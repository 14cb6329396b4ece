use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{Config, General};
use crate::errors::SkyfeedInitError;
use crate::manager_mail::Mail;
use crate::manager_warehouse::Warehouse;
use crate::manager_weather_api::WeatherApi;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {m}{n}";

pub struct Mgr {
    pub api: WeatherApi,
    pub warehouse: Warehouse,
    pub mail: Option<Mail>,
}

/// Initializes and returns the WeatherApi, Warehouse and optional Mail structs.
///
/// Failing to open the warehouse aborts the run here, before any
/// municipality is processed.
///
/// # Arguments
///
/// * 'config' - the loaded configuration
pub fn init(config: &Config) -> Result<Mgr, SkyfeedInitError> {
    let api = WeatherApi::new(&config.weather_api);
    let warehouse = Warehouse::open(&config.database.path)?;

    let mail = match &config.mail {
        Some(params) => Some(Mail::new(params)?),
        None => None,
    };

    Ok(Mgr { api, warehouse, mail })
}

/// Sets up logging to file and optionally to stdout
///
/// # Arguments
///
/// * 'general' - the general section of the configuration
pub fn setup_logger(general: &General) -> Result<(), SkyfeedInitError> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&general.log_path)?;

    let mut config_builder = log4rs::Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root_builder = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();

        config_builder = config_builder
            .appender(Appender::builder().build("stdout", Box::new(stdout)));
        root_builder = root_builder.appender("stdout");
    }

    let log_config = config_builder.build(root_builder.build(general.log_level))?;
    log4rs::init_config(log_config)?;

    Ok(())
}
