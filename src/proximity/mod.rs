//! Proximity evaluation of a listing's geotag.
//!
//! Pure computation over an immutable [`ProximityConfig`](crate::config::ProximityConfig);
//! safe to call from many threads at once.

mod annotator;
mod distance;

pub use annotator::{annotate, annotate_listing};
pub use distance::{haversine_km, EARTH_RADIUS_KM};
