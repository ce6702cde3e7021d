//! Scraped listing record as handed over by the search integration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::GeoPoint;
use crate::error::InputError;

/// A single listing. Only `geotag` and `where` feed the annotator; the
/// rest is carried through to the notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    /// Price as displayed by the source (e.g. "$1850")
    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub url: String,

    /// Free-text description of where the listing was posted
    #[serde(default, rename = "where")]
    pub location: Option<String>,

    #[serde(default)]
    pub datetime: Option<String>,

    /// Raw geotag: `[lat, lon]` or `{"lat": .., "lon": ..}`
    #[serde(default)]
    pub geotag: Option<Value>,
}

impl Listing {
    /// Parse the geotag into a point, rejecting anything missing or malformed.
    pub fn geo_point(&self) -> Result<GeoPoint, InputError> {
        let raw = match &self.geotag {
            None | Some(Value::Null) => return Err(InputError::MissingGeotag),
            Some(v) => v,
        };

        let (lat, lon) = match raw {
            Value::Array(items) if items.len() == 2 => {
                (coordinate(&items[0], "latitude")?, coordinate(&items[1], "longitude")?)
            }
            Value::Array(items) => {
                return Err(InputError::MalformedGeotag(format!(
                    "expected 2 coordinates, got {}",
                    items.len()
                )))
            }
            Value::Object(map) => {
                let lat = map
                    .get("lat")
                    .ok_or_else(|| InputError::MalformedGeotag("missing 'lat'".to_string()))?;
                let lon = map
                    .get("lon")
                    .ok_or_else(|| InputError::MalformedGeotag("missing 'lon'".to_string()))?;
                (coordinate(lat, "latitude")?, coordinate(lon, "longitude")?)
            }
            other => {
                return Err(InputError::MalformedGeotag(format!(
                    "unsupported geotag value {}",
                    other
                )))
            }
        };

        if !lat.is_finite() || !lon.is_finite() {
            return Err(InputError::NonFiniteCoordinate {
                latitude: lat,
                longitude: lon,
            });
        }

        Ok(GeoPoint::new(lat, lon))
    }

    /// Location text, empty when the source gave none.
    pub fn location_text(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }
}

fn coordinate(value: &Value, axis: &str) -> Result<f64, InputError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| InputError::MalformedGeotag(format!("{} {} is not a float", axis, n))),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            InputError::MalformedGeotag(format!("{} '{}' is not numeric", axis, s))
        }),
        other => Err(InputError::MalformedGeotag(format!(
            "{} {} is not numeric",
            axis, other
        ))),
    }
}
