//! Geographic points and latitude/longitude rectangles.

use geo::{coord, Contains, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Geographic point (lat/lon) in decimal degrees.
///
/// Ranges are not validated; configured data is trusted as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

/// Axis-aligned rectangle in lat/lon space.
///
/// Corner convention: `southwest` holds the minimum latitude and minimum
/// longitude, `northeast` the maximum of both. Boxes crossing the
/// antimeridian cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    rect: Rect<f64>,
}

impl BoundingBox {
    /// Build a box from its southwest and northeast corners.
    ///
    /// `region` is only used to label the error.
    pub fn new(region: &str, southwest: GeoPoint, northeast: GeoPoint) -> Result<Self, ConfigError> {
        if !southwest.is_finite() || !northeast.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate {
                context: format!("region '{}'", region),
            });
        }
        if southwest.lat >= northeast.lat {
            return Err(ConfigError::InvalidBox {
                region: region.to_string(),
                reason: format!(
                    "southwest latitude {} must be below northeast latitude {}",
                    southwest.lat, northeast.lat
                ),
            });
        }
        if southwest.lon >= northeast.lon {
            return Err(ConfigError::InvalidBox {
                region: region.to_string(),
                reason: format!(
                    "southwest longitude {} must be west of northeast longitude {}",
                    southwest.lon, northeast.lon
                ),
            });
        }

        Ok(Self {
            rect: Rect::new(
                coord! { x: southwest.lon, y: southwest.lat },
                coord! { x: northeast.lon, y: northeast.lat },
            ),
        })
    }

    /// Build a box from the scraper-settings layout
    /// `[(min lat, max lon), (max lat, min lon)]`.
    pub fn from_legacy_corners(region: &str, first: GeoPoint, second: GeoPoint) -> Result<Self, ConfigError> {
        Self::new(
            region,
            GeoPoint::new(first.lat, second.lon),
            GeoPoint::new(second.lat, first.lon),
        )
    }

    pub fn southwest(&self) -> GeoPoint {
        GeoPoint::new(self.rect.min().y, self.rect.min().x)
    }

    pub fn northeast(&self) -> GeoPoint {
        GeoPoint::new(self.rect.max().y, self.rect.max().x)
    }

    /// Strict containment: a point on an edge is outside.
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.rect.contains(&Point::from(point))
    }
}
