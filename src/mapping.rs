use std::fmt;
use chrono::NaiveDateTime;
use crate::models::rows::{CurrentAirQualityRow, CurrentWeatherRow, HourlyForecastRow};
use crate::models::weather_api::{Astro, Current, Forecast};

/// Timestamp format used by WeatherAPI in last_updated and hourly time fields
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug)]
pub enum MappingError {
    Timestamp(String),
    MissingField(&'static str),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MappingError::Timestamp(e) => write!(f, "MappingError::Timestamp: {}", e),
            MappingError::MissingField(e) => write!(f, "MappingError::MissingField: {}", e),
        }
    }
}

/// Parses a WeatherAPI timestamp text into a date time value
///
/// # Arguments
///
/// * 'text' - timestamp text in the fixed 'YYYY-MM-DD HH:MM' format
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, MappingError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map_err(|e| MappingError::Timestamp(format!("'{}': {}", text, e)))
}

/// Maps the instantaneous weather block to a fact_weather_current row image.
///
/// Absent optional fields map to null columns, the nested condition object
/// and today's astro block may both be missing.
///
/// # Arguments
///
/// * 'city_id' - identifier of the municipality the observation belongs to
/// * 'observed_at' - parsed current.last_updated value
/// * 'current' - the current weather block of the payload
/// * 'astro' - astro block of the first forecast day, if any
pub fn map_current_weather(
    city_id: i64,
    observed_at: NaiveDateTime,
    current: &Current,
    astro: Option<&Astro>,
) -> CurrentWeatherRow {
    let condition = current.condition.as_ref();

    CurrentWeatherRow {
        city_id,
        observed_at,
        last_updated: observed_at,
        temp_c: current.temp_c,
        feelslike_c: current.feelslike_c,
        humidity: current.humidity,
        wind_kph: current.wind_kph,
        pressure_mb: current.pressure_mb,
        condition_text: condition.and_then(|c| c.text.clone()),
        condition_icon: condition.and_then(|c| c.icon.clone()),
        sunrise: astro.and_then(|a| a.sunrise.clone()),
        sunset: astro.and_then(|a| a.sunset.clone()),
        vis_km: current.vis_km,
        uv: current.uv,
        wind_dir: current.wind_dir.clone(),
    }
}

/// Maps the embedded air quality block to a fact_air_quality_current row image.
///
/// A payload without an air_quality block still produces a row, with all
/// pollutant columns null.
///
/// # Arguments
///
/// * 'city_id' - identifier of the municipality the observation belongs to
/// * 'observed_at' - parsed current.last_updated value
/// * 'current' - the current weather block of the payload
pub fn map_current_air_quality(
    city_id: i64,
    observed_at: NaiveDateTime,
    current: &Current,
) -> CurrentAirQualityRow {
    let aq = current.air_quality.as_ref();

    CurrentAirQualityRow {
        city_id,
        observed_at,
        co: aq.and_then(|a| a.co),
        no2: aq.and_then(|a| a.no2),
        o3: aq.and_then(|a| a.o3),
        so2: aq.and_then(|a| a.so2),
        pm2_5: aq.and_then(|a| a.pm2_5),
        pm10: aq.and_then(|a| a.pm10),
        us_epa_index: aq.and_then(|a| a.us_epa_index),
        gb_defra_index: aq.and_then(|a| a.gb_defra_index),
    }
}

/// Maps the forecast block to one fact_weather_forecast_hourly row image per
/// hour of every forecast day. An absent forecast block yields no rows.
///
/// Each day's own astro block supplies sunrise and sunset for its hours. The
/// forecast timestamp doubles as the row's last updated value, upstream does
/// not report a per-hour update time.
///
/// # Arguments
///
/// * 'city_id' - identifier of the municipality the forecast belongs to
/// * 'forecast' - the forecast block of the payload, if any
pub fn map_hourly_forecast(
    city_id: i64,
    forecast: Option<&Forecast>,
) -> Result<Vec<HourlyForecastRow>, MappingError> {
    let mut rows: Vec<HourlyForecastRow> = Vec::new();

    let forecast = match forecast {
        Some(f) => f,
        None => return Ok(rows),
    };

    for day in &forecast.forecastday {
        let astro = day.astro.as_ref();

        for hour in &day.hour {
            let time_text = hour.time.as_deref()
                .ok_or(MappingError::MissingField("forecastday.hour.time"))?;
            let forecast_at = parse_timestamp(time_text)?;

            let condition = hour.condition.as_ref();

            rows.push(HourlyForecastRow {
                city_id,
                forecast_at,
                time_text: time_text.to_string(),
                last_updated: forecast_at,
                temp_c: hour.temp_c,
                humidity: hour.humidity,
                wind_kph: hour.wind_kph,
                chance_of_rain: hour.chance_of_rain,
                condition_text: condition.and_then(|c| c.text.clone()),
                condition_icon: condition.and_then(|c| c.icon.clone()),
                sunrise: astro.and_then(|a| a.sunrise.clone()),
                sunset: astro.and_then(|a| a.sunset.clone()),
                vis_km: hour.vis_km,
                uv: hour.uv,
                wind_dir: hour.wind_dir.clone(),
            });
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use super::*;
    use crate::models::weather_api::ForecastPayload;

    fn payload_with_days(days: u32) -> ForecastPayload {
        let mut forecast_days: Vec<String> = Vec::new();
        for d in 0..days {
            let hours = (0..24)
                .map(|h| format!(
                    r#"{{"time": "2026-08-{:02} {:02}:00", "temp_c": 18.5, "humidity": 62,
                        "wind_kph": 10.1, "chance_of_rain": 20,
                        "condition": {{"text": "Clear", "icon": "clear.png"}},
                        "vis_km": 10.0, "uv": 1.0, "wind_dir": "SW"}}"#,
                    d + 1, h))
                .collect::<Vec<String>>()
                .join(",");

            forecast_days.push(format!(
                r#"{{"astro": {{"sunrise": "06:01 AM", "sunset": "08:45 PM"}}, "hour": [{}]}}"#,
                hours));
        }

        let json = format!(
            r#"
            {{
                "location": {{"name": "Toronto", "country": "Canada"}},
                "current": {{
                    "last_updated": "2026-08-01 14:00",
                    "temp_c": 21.3, "feelslike_c": 22.0, "humidity": 60,
                    "wind_kph": 12.2, "pressure_mb": 1015.0,
                    "condition": {{"text": "Sunny", "icon": "sunny.png"}},
                    "vis_km": 14.0, "uv": 5.0, "wind_dir": "WSW"
                }},
                "forecast": {{"forecastday": [{}]}}
            }}"#,
            forecast_days.join(","));

        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn parses_well_formed_timestamp() {
        let ts = parse_timestamp("2026-08-01 14:30").unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2026-08-01 14:30");
    }

    #[test]
    fn rejects_malformed_timestamp() {
        let err = parse_timestamp("not-a-date").unwrap_err();
        assert!(matches!(err, MappingError::Timestamp(_)));
    }

    #[test]
    fn rejects_timestamp_with_seconds() {
        let err = parse_timestamp("2026-08-01 14:30:00").unwrap_err();
        assert!(matches!(err, MappingError::Timestamp(_)));
    }

    #[test]
    fn current_weather_row_carries_condition_and_astro() {
        let payload = payload_with_days(1);
        let observed_at = parse_timestamp("2026-08-01 14:00").unwrap();
        let astro = payload.forecast.as_ref()
            .and_then(|f| f.forecastday.first())
            .and_then(|d| d.astro.as_ref());

        let row = map_current_weather(7, observed_at, &payload.current, astro);

        assert_eq!(row.city_id, 7);
        assert_eq!(row.observed_at, observed_at);
        assert_eq!(row.last_updated, observed_at);
        assert_eq!(row.temp_c, Some(21.3));
        assert_eq!(row.condition_text.as_deref(), Some("Sunny"));
        assert_eq!(row.sunrise.as_deref(), Some("06:01 AM"));
        assert_eq!(row.sunset.as_deref(), Some("08:45 PM"));
    }

    #[test]
    fn current_weather_row_without_astro_has_null_sun_times() {
        let payload = payload_with_days(1);
        let observed_at = parse_timestamp("2026-08-01 14:00").unwrap();

        let row = map_current_weather(1, observed_at, &payload.current, None);

        assert!(row.sunrise.is_none());
        assert!(row.sunset.is_none());
        assert_eq!(row.temp_c, Some(21.3));
    }

    #[test]
    fn absent_air_quality_maps_to_all_null_pollutants() {
        let payload = payload_with_days(1);
        let observed_at = parse_timestamp("2026-08-01 14:00").unwrap();

        let row = map_current_air_quality(1, observed_at, &payload.current);

        assert!(row.co.is_none());
        assert!(row.no2.is_none());
        assert!(row.o3.is_none());
        assert!(row.so2.is_none());
        assert!(row.pm2_5.is_none());
        assert!(row.pm10.is_none());
        assert!(row.us_epa_index.is_none());
        assert!(row.gb_defra_index.is_none());
    }

    #[test]
    fn two_days_of_hours_map_to_48_distinct_rows() {
        let payload = payload_with_days(2);

        let rows = map_hourly_forecast(3, payload.forecast.as_ref()).unwrap();

        assert_eq!(rows.len(), 48);
        let distinct: HashSet<NaiveDateTime> = rows.iter().map(|r| r.forecast_at).collect();
        assert_eq!(distinct.len(), 48);

        for row in &rows {
            assert_eq!(row.city_id, 3);
            assert_eq!(row.last_updated, row.forecast_at);
            assert_eq!(row.sunrise.as_deref(), Some("06:01 AM"));
            assert_eq!(row.chance_of_rain, Some(20));
        }
    }

    #[test]
    fn absent_forecast_block_maps_to_no_rows() {
        let rows = map_hourly_forecast(1, None).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn hour_without_time_fails_the_mapping() {
        let json = r#"
        {
            "current": {"last_updated": "2026-08-01 14:00"},
            "forecast": {"forecastday": [{"hour": [{"temp_c": 18.0}]}]}
        }"#;
        let payload: ForecastPayload = serde_json::from_str(json).unwrap();

        let err = map_hourly_forecast(1, payload.forecast.as_ref()).unwrap_err();
        assert!(matches!(err, MappingError::MissingField(_)));
    }

    #[test]
    fn hour_with_malformed_time_fails_the_mapping() {
        let json = r#"
        {
            "current": {"last_updated": "2026-08-01 14:00"},
            "forecast": {"forecastday": [{"hour": [{"time": "08/01/2026 2pm"}]}]}
        }"#;
        let payload: ForecastPayload = serde_json::from_str(json).unwrap();

        let err = map_hourly_forecast(1, payload.forecast.as_ref()).unwrap_err();
        assert!(matches!(err, MappingError::Timestamp(_)));
    }
}
