//! Canonical weather entities and the schema-tolerant response envelopes.
//!
//! The Foreca API is not stable about field names: collections arrive under
//! several historically-used keys, coordinates are sometimes flat and
//! sometimes nested. Every model field is optional and each envelope exposes
//! an accessor that tries the known aliases in a fixed priority order,
//! first non-null wins. Unknown wire fields are ignored.

use serde::{Deserialize, Serialize};

/// A place returned by the location-search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub timezone: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub coordinates: Option<Coordinates>,
}

impl Location {
    /// String identity used in request paths; empty when the wire id is absent.
    pub fn identifier(&self) -> String {
        self.id.map(|id| id.to_string()).unwrap_or_default()
    }

    /// Resolution order: flat `lat`, then the nested coordinate object.
    pub fn latitude(&self) -> Option<f64> {
        self.lat
            .or_else(|| self.coordinates.as_ref().and_then(Coordinates::lat_value))
    }

    pub fn longitude(&self) -> Option<f64> {
        self.lon
            .or_else(|| self.coordinates.as_ref().and_then(Coordinates::lon_value))
    }
}

/// Nested coordinate object; some deployments use short key names, some long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Coordinates {
    pub fn lat_value(&self) -> Option<f64> {
        self.lat.or(self.latitude)
    }

    pub fn lon_value(&self) -> Option<f64> {
        self.lon.or(self.longitude)
    }
}

/// Envelope for `location/search`. Alias order: `locations`, `data`,
/// `results`, `items`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationSearchResponse {
    pub locations: Option<Vec<Location>>,
    pub data: Option<Vec<Location>>,
    pub results: Option<Vec<Location>>,
    pub items: Option<Vec<Location>>,
}

impl LocationSearchResponse {
    pub fn into_list(self) -> Vec<Location> {
        self.locations
            .or(self.data)
            .or(self.results)
            .or(self.items)
            .unwrap_or_default()
    }
}

/// Current observation snapshot. Absence of any field is a valid state,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<i64>,
    pub humidity: Option<i64>,
    pub symbol: Option<String>,
    pub symbol_phrase: Option<String>,
    pub time: Option<String>,
    pub pressure: Option<f64>,
    pub dew_point: Option<f64>,
    pub visibility: Option<f64>,
    pub uv_index: Option<f64>,
    pub cloudiness: Option<f64>,
    /// Wire key is `precipitation`; canonically this is the last-hour amount.
    #[serde(rename = "precipitation")]
    pub precipitation_1h: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentConditionsResponse {
    pub current: Option<CurrentConditions>,
}

/// One calendar day of the daily forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub date: Option<String>,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub symbol: Option<String>,
    pub symbol_phrase: Option<String>,
    pub precipitation_probability: Option<i64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<i64>,
    pub precipitation: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

impl DailyForecast {
    /// The date string is the identity. When it is missing, the position in
    /// the collection stands in so ids stay unique within one response.
    pub fn entry_id(&self, index: usize) -> String {
        self.date.clone().unwrap_or_else(|| format!("day-{index}"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyForecastResponse {
    pub forecast: Option<Vec<DailyForecast>>,
}

/// One hour of the hourly forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    pub time: Option<String>,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_gust: Option<f64>,
    pub wind_dir: Option<f64>,
    pub precipitation: Option<f64>,
    pub precip_probability: Option<f64>,
    pub cloudiness: Option<f64>,
    pub uv_index: Option<f64>,
    pub symbol: Option<String>,
}

impl HourlyForecast {
    pub fn entry_id(&self, index: usize) -> String {
        self.time.clone().unwrap_or_else(|| format!("hour-{index}"))
    }
}

/// Envelope for the hourly resource. Alias order: `forecast`, `data`,
/// `hourly`, `hours`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyForecastResponse {
    pub forecast: Option<Vec<HourlyForecast>>,
    pub data: Option<Vec<HourlyForecast>>,
    pub hourly: Option<Vec<HourlyForecast>>,
    pub hours: Option<Vec<HourlyForecast>>,
}

impl HourlyForecastResponse {
    pub fn into_list(self) -> Vec<HourlyForecast> {
        self.forecast
            .or(self.data)
            .or(self.hourly)
            .or(self.hours)
            .unwrap_or_default()
    }
}

/// Weather warning with a localized text list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    #[serde(rename = "type")]
    pub hazard_type: Option<String>,
    pub significance: Option<String>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    pub description: Option<Vec<WarningText>>,
}

impl Warning {
    /// Display identity: type + validity window. Two warnings sharing all
    /// three fields collide; acceptable for display, not for storage keys.
    pub fn identity(&self) -> String {
        let mut id = String::new();
        for part in [&self.hazard_type, &self.valid_from, &self.valid_until] {
            if let Some(part) = part {
                id.push_str(part);
            }
        }
        id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarningText {
    pub lang: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WarningsResponse {
    #[serde(default)]
    pub warnings: Vec<Warning>,
}
