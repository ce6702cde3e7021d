//! Named regions and points of interest.

use serde::Serialize;

use super::{BoundingBox, GeoPoint};

/// A named neighborhood box.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRegion {
    pub name: String,
    pub bbox: BoundingBox,
}

/// A named location measured against, e.g. a grocery store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOfInterest {
    pub name: String,
    pub location: GeoPoint,
}
