use serde::Deserialize;

#[derive(Deserialize)]
pub struct Location {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct Condition {
    pub text: Option<String>,
    pub icon: Option<String>,
}

#[derive(Deserialize)]
pub struct AirQuality {
    pub co: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    #[serde(rename = "us-epa-index")]
    pub us_epa_index: Option<i64>,
    #[serde(rename = "gb-defra-index")]
    pub gb_defra_index: Option<i64>,
}

#[derive(Deserialize)]
pub struct Current {
    pub last_updated: Option<String>,
    pub temp_c: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub humidity: Option<i64>,
    pub wind_kph: Option<f64>,
    pub pressure_mb: Option<f64>,
    pub condition: Option<Condition>,
    pub vis_km: Option<f64>,
    pub uv: Option<f64>,
    pub wind_dir: Option<String>,
    pub air_quality: Option<AirQuality>,
}

#[derive(Deserialize)]
pub struct Astro {
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Deserialize)]
pub struct Hour {
    pub time: Option<String>,
    pub temp_c: Option<f64>,
    pub humidity: Option<i64>,
    pub wind_kph: Option<f64>,
    pub chance_of_rain: Option<i64>,
    pub condition: Option<Condition>,
    pub vis_km: Option<f64>,
    pub uv: Option<f64>,
    pub wind_dir: Option<String>,
}

#[derive(Deserialize)]
pub struct ForecastDay {
    pub astro: Option<Astro>,
    #[serde(default)]
    pub hour: Vec<Hour>,
}

#[derive(Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Deserialize)]
pub struct ForecastPayload {
    pub location: Option<Location>,
    pub current: Current,
    pub forecast: Option<Forecast>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_renamed_air_quality_indices() {
        let json = r#"
        {
            "location": {"name": "Toronto", "region": "Ontario", "country": "Canada"},
            "current": {
                "last_updated": "2026-08-01 14:00",
                "temp_c": 21.3,
                "humidity": 60,
                "air_quality": {
                    "co": 233.1, "no2": 12.4, "o3": 51.0, "so2": 1.9,
                    "pm2_5": 6.7, "pm10": 9.2,
                    "us-epa-index": 1, "gb-defra-index": 2
                }
            }
        }"#;

        let payload: ForecastPayload = serde_json::from_str(json).unwrap();
        let aq = payload.current.air_quality.unwrap();
        assert_eq!(aq.us_epa_index, Some(1));
        assert_eq!(aq.gb_defra_index, Some(2));
        assert_eq!(aq.pm2_5, Some(6.7));
        assert!(payload.forecast.is_none());
    }

    #[test]
    fn missing_optional_blocks_deserialize_to_none() {
        let json = r#"{"current": {"last_updated": "2026-08-01 14:00"}}"#;

        let payload: ForecastPayload = serde_json::from_str(json).unwrap();
        assert!(payload.location.is_none());
        assert!(payload.current.condition.is_none());
        assert!(payload.current.air_quality.is_none());
    }

    #[test]
    fn absent_hour_array_defaults_to_empty() {
        let json = r#"
        {
            "current": {"last_updated": "2026-08-01 14:00"},
            "forecast": {"forecastday": [{"astro": {"sunrise": "06:01 AM", "sunset": "08:45 PM"}}]}
        }"#;

        let payload: ForecastPayload = serde_json::from_str(json).unwrap();
        let forecast = payload.forecast.unwrap();
        assert_eq!(forecast.forecastday.len(), 1);
        assert!(forecast.forecastday[0].hour.is_empty());
    }
}
