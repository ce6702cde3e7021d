//! Proximity annotation attached to a listing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of evaluating one point against the proximity configuration.
///
/// Distances are `None` when there was nothing to measure against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Point fell strictly inside a configured region
    pub region_found: bool,

    /// Matched region, or neighborhood from the text fallback; empty if neither
    pub region: String,

    pub near_poi: bool,

    /// Distance to the closest point of interest
    pub poi_distance_km: Option<f64>,

    /// Point of interest reported as near; empty if none
    pub poi_name: String,

    pub near_reference: bool,

    pub reference_distance_km: Option<f64>,
}

impl Annotation {
    /// Whether the listing is worth a notification under the scraper's filter.
    pub fn is_interesting(&self) -> bool {
        self.region_found || self.near_poi
    }
}

/// Display wrapper for an optional distance: one decimal, or `N/A`.
pub struct Distance(pub Option<f64>);

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(km) => write!(f, "{:.1}", km),
            None => write!(f, "N/A"),
        }
    }
}
