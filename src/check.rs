use anyhow::{anyhow, Result};
use crate::config::Config;
use crate::manager_warehouse::Warehouse;
use crate::manager_weather_api::WeatherApi;

/// Probes the weather API and the warehouse without running the pipeline.
///
/// Issues one request against the current weather endpoint for the first
/// configured city and counts the rows in the city dimension table, so a
/// fresh installation can verify its API key, connectivity and database
/// before the first scheduled run.
///
/// # Arguments
///
/// * 'config' - the loaded configuration
pub fn run(config: &Config) -> Result<()> {
    let city = config.cities.names.first()
        .ok_or(anyhow!("no cities configured"))?;

    let api = WeatherApi::new(&config.weather_api);
    let status = api.check_current(city).map_err(|e| anyhow!("{}", e))?;

    println!("API status: {}", status);
    println!("City: {}", city);

    let warehouse = Warehouse::open(&config.database.path)?;
    println!("Cities in warehouse: {}", warehouse.city_count()?);

    Ok(())
}
