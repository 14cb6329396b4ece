pub mod errors;

use rusqlite::{Connection, Transaction, ffi, params};
use crate::manager_warehouse::errors::WarehouseError;
use crate::models::rows::{City, CurrentAirQualityRow, CurrentWeatherRow, HourlyForecastRow};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS dim_city (
        CityId    INTEGER PRIMARY KEY,
        CityName  TEXT NOT NULL UNIQUE,
        IsActive  INTEGER NOT NULL DEFAULT 1
    );

    CREATE TABLE IF NOT EXISTS fact_weather_current (
        CityId         INTEGER NOT NULL REFERENCES dim_city (CityId),
        ObservedAt     TEXT NOT NULL,
        LastUpdated    TEXT,
        TempC          REAL,
        FeelsLikeC     REAL,
        Humidity       INTEGER,
        WindKph        REAL,
        PressureMb     REAL,
        ConditionText  TEXT,
        ConditionIcon  TEXT,
        Sunrise        TEXT,
        Sunset         TEXT,
        vis_km         REAL,
        uv             REAL,
        wind_dir       TEXT,
        PRIMARY KEY (CityId, ObservedAt)
    );

    CREATE TABLE IF NOT EXISTS fact_air_quality_current (
        CityId          INTEGER NOT NULL REFERENCES dim_city (CityId),
        ObservedAt      TEXT NOT NULL,
        CO              REAL,
        NO2             REAL,
        O3              REAL,
        SO2             REAL,
        PM2_5           REAL,
        PM10            REAL,
        US_EPA_Index    INTEGER,
        GB_DEFRA_Index  INTEGER,
        PRIMARY KEY (CityId, ObservedAt)
    );

    CREATE TABLE IF NOT EXISTS fact_weather_forecast_hourly (
        CityId         INTEGER NOT NULL REFERENCES dim_city (CityId),
        ForecastAt     TEXT NOT NULL,
        TimeText       TEXT,
        LastUpdated    TEXT,
        TempC          REAL,
        Humidity       INTEGER,
        WindKph        REAL,
        ChanceOfRain   INTEGER,
        ConditionText  TEXT,
        ConditionIcon  TEXT,
        Sunrise        TEXT,
        Sunset         TEXT,
        vis_km         REAL,
        uv             REAL,
        wind_dir       TEXT,
        PRIMARY KEY (CityId, ForecastAt)
    );
";

/// Struct for managing the warehouse database holding the city dimension
/// table and the three append-only fact tables
pub struct Warehouse {
    pub(crate) conn: Connection,
}

impl Warehouse {
    /// Opens the warehouse database, applies connection pragmas and makes
    /// sure the schema is in place. The schema statements are idempotent so
    /// an already populated warehouse is left untouched.
    ///
    /// # Arguments
    ///
    /// * 'path' - path to the database file, or ':memory:' for a transient one
    pub fn open(path: &str) -> Result<Warehouse, WarehouseError> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };

        conn.execute_batch("
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
        ")?;
        conn.execute_batch(SCHEMA)?;

        Ok(Warehouse { conn })
    }

    /// Returns the active municipalities ordered by identifier, which gives
    /// the run its deterministic processing order
    pub fn active_cities(&self) -> Result<Vec<City>, WarehouseError> {
        let mut stmt = self.conn.prepare(
            "SELECT CityId, CityName FROM dim_city WHERE IsActive = 1 ORDER BY CityId")?;

        let cities = stmt
            .query_map([], |row| Ok(City { id: row.get(0)?, name: row.get(1)? }))?
            .collect::<Result<Vec<City>, rusqlite::Error>>()?;

        Ok(cities)
    }

    /// Starts a new transaction, one per municipality in the pipeline run.
    /// Dropping the transaction without committing rolls it back.
    pub fn transaction(&mut self) -> Result<Transaction<'_>, WarehouseError> {
        Ok(self.conn.transaction()?)
    }

    /// Inserts the given city names into the dimension table as active,
    /// skipping names that are already present. Returns the number of
    /// cities actually added.
    ///
    /// Used by the seed mode only, the pipeline run never writes dim_city.
    ///
    /// # Arguments
    ///
    /// * 'names' - the city names to add
    pub fn seed_cities(&mut self, names: &[String]) -> Result<usize, WarehouseError> {
        let tx = self.conn.transaction()?;

        let mut inserted = 0;
        for name in names {
            inserted += tx.execute(
                "INSERT OR IGNORE INTO dim_city (CityName, IsActive) VALUES (?1, 1)",
                params![name])?;
        }

        tx.commit()?;
        Ok(inserted)
    }

    /// Returns the total number of cities in the dimension table
    pub fn city_count(&self) -> Result<i64, WarehouseError> {
        Ok(self.conn.query_row("SELECT COUNT(*) FROM dim_city", [], |row| row.get(0))?)
    }
}

/// Inserts one current weather row. Returns false when a row for the same
/// (CityId, ObservedAt) key was already recorded, any other database
/// failure propagates.
///
/// # Arguments
///
/// * 'conn' - connection or open transaction to insert through
/// * 'row' - the row image to insert
pub fn insert_current_weather(conn: &Connection, row: &CurrentWeatherRow) -> Result<bool, WarehouseError> {
    let result = conn.execute("
        INSERT INTO fact_weather_current
        (
            CityId, ObservedAt, LastUpdated,
            TempC, FeelsLikeC, Humidity, WindKph, PressureMb,
            ConditionText, ConditionIcon,
            Sunrise, Sunset, vis_km, uv, wind_dir
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            row.city_id,
            row.observed_at,
            row.last_updated,
            row.temp_c,
            row.feelslike_c,
            row.humidity,
            row.wind_kph,
            row.pressure_mb,
            row.condition_text,
            row.condition_icon,
            row.sunrise,
            row.sunset,
            row.vis_km,
            row.uv,
            row.wind_dir,
        ]);

    classify_insert(result)
}

/// Inserts one current air quality row. Returns false when a row for the
/// same (CityId, ObservedAt) key was already recorded, any other database
/// failure propagates.
///
/// # Arguments
///
/// * 'conn' - connection or open transaction to insert through
/// * 'row' - the row image to insert
pub fn insert_current_aqi(conn: &Connection, row: &CurrentAirQualityRow) -> Result<bool, WarehouseError> {
    let result = conn.execute("
        INSERT INTO fact_air_quality_current
        (CityId, ObservedAt, CO, NO2, O3, SO2, PM2_5, PM10, US_EPA_Index, GB_DEFRA_Index)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            row.city_id,
            row.observed_at,
            row.co,
            row.no2,
            row.o3,
            row.so2,
            row.pm2_5,
            row.pm10,
            row.us_epa_index,
            row.gb_defra_index,
        ]);

    classify_insert(result)
}

/// Inserts one hourly forecast row. Returns false when a row for the same
/// (CityId, ForecastAt) key was already recorded, any other database
/// failure propagates.
///
/// # Arguments
///
/// * 'conn' - connection or open transaction to insert through
/// * 'row' - the row image to insert
pub fn insert_hourly_forecast(conn: &Connection, row: &HourlyForecastRow) -> Result<bool, WarehouseError> {
    let result = conn.execute("
        INSERT INTO fact_weather_forecast_hourly
        (
            CityId, ForecastAt, TimeText, LastUpdated,
            TempC, Humidity, WindKph, ChanceOfRain,
            ConditionText, ConditionIcon,
            Sunrise, Sunset, vis_km, uv, wind_dir
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            row.city_id,
            row.forecast_at,
            row.time_text,
            row.last_updated,
            row.temp_c,
            row.humidity,
            row.wind_kph,
            row.chance_of_rain,
            row.condition_text,
            row.condition_icon,
            row.sunrise,
            row.sunset,
            row.vis_km,
            row.uv,
            row.wind_dir,
        ]);

    classify_insert(result)
}

/// Classifies an insert outcome. A duplicate key violation means the row was
/// already ingested by an earlier run and is reported as Ok(false), every
/// other failure propagates.
fn classify_insert(result: Result<usize, rusqlite::Error>) -> Result<bool, WarehouseError> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if is_duplicate_key(&e) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Returns true only for primary key and unique constraint violations, other
/// constraint failures such as foreign key violations do not qualify
fn is_duplicate_key(e: &rusqlite::Error) -> bool {
    match e {
        rusqlite::Error::SqliteFailure(f, _) => {
            f.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || f.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}
