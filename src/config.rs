//! TOML configuration for regions, points of interest and notification.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::models::{BoundingBox, GeoPoint, NamedRegion, PointOfInterest};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub thresholds: Thresholds,
    #[serde(default)]
    pub reference: Option<PointConfig>,
    /// Evaluated in file order; the last containing region wins
    #[serde(default)]
    pub regions: Vec<RegionConfig>,
    #[serde(default)]
    pub points_of_interest: Vec<PointConfig>,
    /// Fallback names matched against the listing's location text, in order
    #[serde(default)]
    pub neighborhoods: Vec<String>,
    #[serde(default)]
    pub slack: SlackConfig,
}

/// Distance limits in kilometers; "near" means strictly below.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub max_poi_km: f64,
    pub max_reference_km: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegionConfig {
    pub name: String,
    /// `[lat, lon]` of the minimum-latitude, minimum-longitude corner
    #[serde(default)]
    pub southwest: Option<[f64; 2]>,
    /// `[lat, lon]` of the maximum-latitude, maximum-longitude corner
    #[serde(default)]
    pub northeast: Option<[f64; 2]>,
    /// Scraper-settings layout `[[min lat, max lon], [max lat, min lon]]`,
    /// used instead of `southwest`/`northeast`
    #[serde(default)]
    pub legacy_box: Option<[[f64; 2]; 2]>,
}

impl RegionConfig {
    fn to_bounding_box(&self) -> Result<BoundingBox, ConfigError> {
        match (self.southwest, self.northeast, self.legacy_box) {
            (Some(sw), Some(ne), None) => BoundingBox::new(&self.name, sw.into(), ne.into()),
            (None, None, Some([first, second])) => {
                BoundingBox::from_legacy_corners(&self.name, first.into(), second.into())
            }
            (None, None, None) => Err(ConfigError::InvalidBox {
                region: self.name.clone(),
                reason: "needs southwest/northeast or legacy_box".to_string(),
            }),
            (_, _, Some(_)) => Err(ConfigError::InvalidBox {
                region: self.name.clone(),
                reason: "legacy_box cannot be combined with southwest/northeast".to_string(),
            }),
            _ => Err(ConfigError::InvalidBox {
                region: self.name.clone(),
                reason: "southwest and northeast must both be set".to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PointConfig {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SlackConfig {
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_icon_emoji")]
    pub icon_emoji: String,
}

fn default_channel() -> String {
    "#housing".to_string()
}

fn default_username() -> String {
    "pybot".to_string()
}

fn default_icon_emoji() -> String {
    ":robot_face:".to_string()
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            username: default_username(),
            icon_emoji: default_icon_emoji(),
        }
    }
}

/// Validated, immutable input to the annotator.
#[derive(Debug, Clone)]
pub struct ProximityConfig {
    pub regions: Vec<NamedRegion>,
    pub points_of_interest: Vec<PointOfInterest>,
    pub reference: Option<PointOfInterest>,
    pub thresholds: Thresholds,
    /// Lowercase
    pub neighborhoods: Vec<String>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Check boxes, thresholds and coordinates and build the annotator config.
    pub fn validate(&self) -> Result<ProximityConfig, ConfigError> {
        check_threshold("max_poi_km", self.thresholds.max_poi_km)?;
        check_threshold("max_reference_km", self.thresholds.max_reference_km)?;

        let mut seen = HashSet::new();
        let mut regions = Vec::with_capacity(self.regions.len());
        for r in &self.regions {
            if !seen.insert(r.name.as_str()) {
                return Err(ConfigError::DuplicateRegion(r.name.clone()));
            }
            let bbox = r.to_bounding_box()?;
            debug!(
                "Region '{}' spans {:?} to {:?}",
                r.name,
                bbox.southwest(),
                bbox.northeast()
            );
            regions.push(NamedRegion {
                name: r.name.clone(),
                bbox,
            });
        }

        let points_of_interest = self
            .points_of_interest
            .iter()
            .map(|p| p.to_point_of_interest("point of interest"))
            .collect::<Result<Vec<_>, _>>()?;

        let reference = self
            .reference
            .as_ref()
            .map(|p| p.to_point_of_interest("reference point"))
            .transpose()?;

        let neighborhoods = self
            .neighborhoods
            .iter()
            .map(|n| n.trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();

        let proximity = ProximityConfig {
            regions,
            points_of_interest,
            reference,
            thresholds: self.thresholds,
            neighborhoods,
        };

        info!(
            "Loaded {} regions, {} points of interest, {} neighborhoods",
            proximity.regions.len(),
            proximity.points_of_interest.len(),
            proximity.neighborhoods.len()
        );

        Ok(proximity)
    }
}

impl PointConfig {
    fn to_point_of_interest(&self, kind: &str) -> Result<PointOfInterest, ConfigError> {
        let location = GeoPoint::new(self.lat, self.lon);
        if !location.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate {
                context: format!("{} '{}'", kind, self.name),
            });
        }
        Ok(PointOfInterest {
            name: self.name.clone(),
            location,
        })
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { field, value })
    }
}
