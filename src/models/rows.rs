use chrono::NaiveDateTime;

/// One active municipality from the dim_city dimension table
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub id: i64,
    pub name: String,
}

/// Row image for fact_weather_current, keyed by (CityId, ObservedAt)
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeatherRow {
    pub city_id: i64,
    pub observed_at: NaiveDateTime,
    pub last_updated: NaiveDateTime,
    pub temp_c: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub humidity: Option<i64>,
    pub wind_kph: Option<f64>,
    pub pressure_mb: Option<f64>,
    pub condition_text: Option<String>,
    pub condition_icon: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub vis_km: Option<f64>,
    pub uv: Option<f64>,
    pub wind_dir: Option<String>,
}

/// Row image for fact_air_quality_current, keyed by (CityId, ObservedAt)
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentAirQualityRow {
    pub city_id: i64,
    pub observed_at: NaiveDateTime,
    pub co: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub us_epa_index: Option<i64>,
    pub gb_defra_index: Option<i64>,
}

/// Row image for fact_weather_forecast_hourly, keyed by (CityId, ForecastAt)
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecastRow {
    pub city_id: i64,
    pub forecast_at: NaiveDateTime,
    pub time_text: String,
    pub last_updated: NaiveDateTime,
    pub temp_c: Option<f64>,
    pub humidity: Option<i64>,
    pub wind_kph: Option<f64>,
    pub chance_of_rain: Option<i64>,
    pub condition_text: Option<String>,
    pub condition_icon: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub vis_km: Option<f64>,
    pub uv: Option<f64>,
    pub wind_dir: Option<String>,
}
