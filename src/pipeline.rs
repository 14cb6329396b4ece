use std::fmt;
use std::fmt::Formatter;
use chrono::{DateTime, Local};
use log::{info, warn};
use crate::errors::{IngestError, SkyfeedRunError};
use crate::manager_warehouse::{self, Warehouse};
use crate::manager_warehouse::errors::WarehouseError;
use crate::manager_weather_api::WeatherApiError;
use crate::mapping::{map_current_air_quality, map_current_weather, map_hourly_forecast, parse_timestamp, MappingError};
use crate::models::rows::City;
use crate::models::weather_api::ForecastPayload;

/// Outcome of one pipeline run over all active municipalities
pub struct RunSummary {
    pub success: usize,
    pub failed: usize,
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
}

/// Implementation of the Display Trait for the end of run report
impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let duration = self.finished - self.started;

        write!(f, "pipeline finished at: {}\n", self.finished.format("%Y-%m-%d %H:%M:%S"))?;
        write!(f, "total duration: {:02}:{:02}:{:02}\n",
               duration.num_hours(),
               duration.num_minutes() % 60,
               duration.num_seconds() % 60)?;
        write!(f, "SUCCESS={}, FAILED={}", self.success, self.failed)
    }
}

/// Runs the pipeline over all active municipalities, strictly sequentially.
///
/// Each municipality is fetched, mapped and persisted inside its own
/// transaction before the next one begins. A failing municipality is rolled
/// back, reported and counted, it never aborts the run. Only a failure to
/// load the city list aborts the whole run.
///
/// # Arguments
///
/// * 'warehouse' - the warehouse holding the dimension and fact tables
/// * 'fetch' - performs the forecast request for one municipality name
pub fn run<F>(warehouse: &mut Warehouse, fetch: F) -> Result<RunSummary, SkyfeedRunError>
where
    F: Fn(&str) -> Result<ForecastPayload, WeatherApiError>,
{
    let started = Local::now();
    info!("{:=<60}", "");
    info!("pipeline started at: {}", started.format("%Y-%m-%d %H:%M:%S"));
    info!("{:=<60}", "");

    let cities = warehouse.active_cities()?;

    let mut success: usize = 0;
    let mut failed: usize = 0;

    for city in &cities {
        match ingest_city(warehouse, &fetch, city) {
            Ok(()) => {
                success += 1;
                info!("[OK] {}", city.name);
            }
            Err(e) => {
                failed += 1;
                warn!("[FAIL] {}: {}", city.name, e);
            }
        }
    }

    let summary = RunSummary { success, failed, started, finished: Local::now() };

    info!("{:=<60}", "");
    for line in summary.to_string().lines() {
        info!("{}", line);
    }
    info!("{:=<60}", "");

    Ok(summary)
}

/// Fetches, maps and persists one municipality inside a single transaction.
///
/// The observation timestamp comes from current.last_updated and is
/// mandatory, a missing or malformed value fails the whole iteration. The
/// three inserts individually suppress already ingested rows, so a rerun
/// over unchanged upstream data commits without adding anything.
///
/// # Arguments
///
/// * 'warehouse' - the warehouse holding the fact tables
/// * 'fetch' - performs the forecast request for one municipality name
/// * 'city' - the municipality to ingest
fn ingest_city<F>(warehouse: &mut Warehouse, fetch: &F, city: &City) -> Result<(), IngestError>
where
    F: Fn(&str) -> Result<ForecastPayload, WeatherApiError>,
{
    let payload = fetch(&city.name)?;

    let last_updated = payload.current.last_updated.as_deref()
        .ok_or(MappingError::MissingField("current.last_updated"))?;
    let observed_at = parse_timestamp(last_updated)?;

    let astro_today = payload.forecast.as_ref()
        .and_then(|f| f.forecastday.first())
        .and_then(|d| d.astro.as_ref());

    let weather = map_current_weather(city.id, observed_at, &payload.current, astro_today);
    let air_quality = map_current_air_quality(city.id, observed_at, &payload.current);
    let hourly = map_hourly_forecast(city.id, payload.forecast.as_ref())?;

    let tx = warehouse.transaction()?;

    manager_warehouse::insert_current_weather(&tx, &weather)?;
    manager_warehouse::insert_current_aqi(&tx, &air_quality)?;
    for row in &hourly {
        manager_warehouse::insert_hourly_forecast(&tx, row)?;
    }

    tx.commit().map_err(WarehouseError::from)?;

    Ok(())
}
