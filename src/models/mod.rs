//! Core data models for listing annotation.

pub mod annotation;
pub mod listing;
pub mod point;
pub mod region;

pub use annotation::{Annotation, Distance};
pub use listing::Listing;
pub use point::{BoundingBox, GeoPoint};
pub use region::{NamedRegion, PointOfInterest};
