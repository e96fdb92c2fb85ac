//! Payload models for the api.weather.gov station and observation schemas.
//!
//! The client decodes, it does not reshape: fields not modelled here are
//! kept in each type's `extra` map so nothing the server sent is lost.

use crate::request::cursor_from_next;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A measured value with its WMO unit code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    /// Unit code such as `wmoUnit:degC`
    #[serde(default)]
    pub unit_code: String,
    /// The value; `null` when the sensor reported nothing
    pub value: Option<f64>,
    /// Quality control flag, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_control: Option<String>,
}

impl QuantitativeValue {
    /// Unit name without the `wmoUnit:` style prefix
    pub fn unit(&self) -> &str {
        self.unit_code
            .rsplit_once(':')
            .map(|(_, unit)| unit)
            .unwrap_or(&self.unit_code)
    }
}

impl fmt::Display for QuantitativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{} {}", value, self.unit()),
            None => write!(f, "n/a"),
        }
    }
}

/// GeoJSON point geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    /// Geometry type, normally `Point`
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude]`
    pub coordinates: Vec<f64>,
}

impl PointGeometry {
    /// Longitude in degrees
    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.first().copied()
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.get(1).copied()
    }
}

/// Response of `GET /stations/{stationId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station IRI
    pub id: String,
    /// GeoJSON type, normally `Feature`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Station location
    #[serde(default)]
    pub geometry: Option<PointGeometry>,
    /// Station metadata
    pub properties: StationProperties,
    /// Unmodelled top-level fields such as `@context`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Station metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationProperties {
    /// Short identifier, e.g. `KSEA`
    pub station_identifier: String,
    /// Human-readable name
    pub name: String,
    /// IANA time zone name
    pub time_zone: String,
    /// Station elevation
    pub elevation: QuantitativeValue,
    /// Forecast zone link
    #[serde(default)]
    pub forecast: Option<String>,
    /// County zone link
    #[serde(default)]
    pub county: Option<String>,
    /// Fire weather zone link
    #[serde(default)]
    pub fire_weather_zone: Option<String>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `GET /stations/{stationId}/observations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationCollection {
    /// Observations in server order
    pub features: Vec<Observation>,
    /// Link to the next page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// Unmodelled top-level fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ObservationCollection {
    /// Number of observations on this page
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether this page is empty
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Cursor for the following page, if the server linked one
    pub fn next_cursor(&self) -> Option<String> {
        self.pagination.as_ref().and_then(Pagination::next_cursor)
    }
}

/// Pagination block of a collection response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    /// Full URL of the next page; carries a `cursor` query parameter
    #[serde(default)]
    pub next: Option<String>,
}

impl Pagination {
    /// The `cursor` parameter of [`next`](Self::next), verbatim
    pub fn next_cursor(&self) -> Option<String> {
        self.next.as_deref().and_then(cursor_from_next)
    }
}

/// A single station observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation IRI
    pub id: String,
    /// GeoJSON type, normally `Feature`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Observation location
    #[serde(default)]
    pub geometry: Option<PointGeometry>,
    /// Measured values
    pub properties: ObservationProperties,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Measured values of an observation. Any sensor may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationProperties {
    /// When the observation was taken, with the server's offset
    pub timestamp: DateTime<FixedOffset>,
    #[serde(default)]
    pub station: Option<String>,
    #[serde(default)]
    pub raw_message: Option<String>,
    #[serde(default)]
    pub text_description: Option<String>,
    #[serde(default)]
    pub temperature: Option<QuantitativeValue>,
    #[serde(default)]
    pub dewpoint: Option<QuantitativeValue>,
    #[serde(default)]
    pub wind_direction: Option<QuantitativeValue>,
    #[serde(default)]
    pub wind_speed: Option<QuantitativeValue>,
    #[serde(default)]
    pub wind_gust: Option<QuantitativeValue>,
    #[serde(default)]
    pub barometric_pressure: Option<QuantitativeValue>,
    #[serde(default)]
    pub sea_level_pressure: Option<QuantitativeValue>,
    #[serde(default)]
    pub visibility: Option<QuantitativeValue>,
    #[serde(default)]
    pub relative_humidity: Option<QuantitativeValue>,
    #[serde(default)]
    pub wind_chill: Option<QuantitativeValue>,
    #[serde(default)]
    pub heat_index: Option<QuantitativeValue>,
    #[serde(default)]
    pub precipitation_last_hour: Option<QuantitativeValue>,
    /// Unmodelled fields (`cloudLayers`, `presentWeather`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
