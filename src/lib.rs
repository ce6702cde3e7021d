//! Nestscout - proximity annotation for scraped housing listings
//!
//! This library provides the annotator and notification pieces used by the
//! `annotate` binary.

pub mod config;
pub mod error;
pub mod models;
pub mod proximity;
pub mod slack;

pub use config::{Config, ProximityConfig, Thresholds};
pub use error::{ConfigError, InputError};
pub use models::{Annotation, GeoPoint, Listing};
