//! Region, point-of-interest and reference checks for a single listing.

use tracing::debug;

use super::distance::haversine_km;
use crate::config::ProximityConfig;
use crate::error::InputError;
use crate::models::{Annotation, GeoPoint, Listing};

/// Annotate a point against the configuration.
///
/// Regions are scanned in full and the last containing one wins. A point of
/// interest is reported as near only when it beats every earlier candidate
/// and is under the threshold. The neighborhood list is consulted only when
/// no region contains the point.
pub fn annotate(point: GeoPoint, location_text: &str, config: &ProximityConfig) -> Annotation {
    let mut annotation = Annotation::default();

    for region in &config.regions {
        if region.bbox.contains(point) {
            annotation.region = region.name.clone();
            annotation.region_found = true;
        }
    }
    if annotation.region_found {
        debug!("({}, {}) inside region '{}'", point.lat, point.lon, annotation.region);
    }

    let mut min_dist: Option<f64> = None;
    for poi in &config.points_of_interest {
        let dist = haversine_km(poi.location, point);
        let improves = min_dist.map_or(true, |m| dist < m);
        if improves {
            if dist < config.thresholds.max_poi_km {
                annotation.poi_name = poi.name.clone();
                annotation.near_poi = true;
            }
            min_dist = Some(dist);
        }
    }
    annotation.poi_distance_km = min_dist;

    if let Some(reference) = &config.reference {
        let dist = haversine_km(reference.location, point);
        annotation.near_reference = dist < config.thresholds.max_reference_km;
        annotation.reference_distance_km = Some(dist);
    }

    if annotation.region.is_empty() {
        let text = location_text.to_lowercase();
        if let Some(hood) = config
            .neighborhoods
            .iter()
            .find(|hood| !hood.is_empty() && text.contains(hood.to_lowercase().as_str()))
        {
            debug!("Location text '{}' matched neighborhood '{}'", location_text, hood);
            annotation.region = hood.clone();
        }
    }

    annotation
}

/// Annotate a scraped listing, rejecting it if the geotag is unusable.
pub fn annotate_listing(listing: &Listing, config: &ProximityConfig) -> Result<Annotation, InputError> {
    let point = listing.geo_point()?;
    Ok(annotate(point, listing.location_text(), config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::models::{BoundingBox, NamedRegion, PointOfInterest};
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    fn region(name: &str, sw: (f64, f64), ne: (f64, f64)) -> NamedRegion {
        NamedRegion {
            name: name.to_string(),
            bbox: BoundingBox::new(name, GeoPoint::new(sw.0, sw.1), GeoPoint::new(ne.0, ne.1)).unwrap(),
        }
    }

    fn poi(name: &str, lat: f64, lon: f64) -> PointOfInterest {
        PointOfInterest {
            name: name.to_string(),
            location: GeoPoint::new(lat, lon),
        }
    }

    fn empty_config() -> ProximityConfig {
        ProximityConfig {
            regions: vec![],
            points_of_interest: vec![],
            reference: None,
            thresholds: Thresholds {
                max_poi_km: 1.0,
                max_reference_km: 1.0,
            },
            neighborhoods: vec![],
        }
    }

    #[test]
    fn test_downtown_scenario() {
        let config = ProximityConfig {
            regions: vec![region("downtown", (10.0, 10.0), (20.0, 20.0))],
            points_of_interest: vec![poi("market", 15.0, 15.0)],
            reference: Some(poi("work", 15.0, 15.01)),
            // 0.01 deg of longitude at 15N is ~1.07 km
            thresholds: Thresholds {
                max_poi_km: 1.0,
                max_reference_km: 1.5,
            },
            ..empty_config()
        };

        let a = annotate(GeoPoint::new(15.0, 15.0), "", &config);
        assert!(a.region_found);
        assert_eq!(a.region, "downtown");
        assert!(a.near_poi);
        assert_eq!(a.poi_name, "market");
        assert_abs_diff_eq!(a.poi_distance_km.unwrap(), 0.0, epsilon = 1e-9);
        assert!(a.near_reference);
        assert_abs_diff_eq!(a.reference_distance_km.unwrap(), 1.073, epsilon = 0.01);

        let strict = ProximityConfig {
            thresholds: Thresholds {
                max_poi_km: 1.0,
                max_reference_km: 1.0,
            },
            ..config
        };
        let a = annotate(GeoPoint::new(15.0, 15.0), "", &strict);
        assert!(!a.near_reference);
        assert!(a.near_poi);
    }

    #[test]
    fn test_neighborhood_text_fallback() {
        let config = ProximityConfig {
            regions: vec![region("downtown", (10.0, 10.0), (20.0, 20.0))],
            neighborhoods: vec!["riverside".to_string(), "downtown".to_string()],
            ..empty_config()
        };

        let a = annotate(GeoPoint::new(40.0, 40.0), "I live near Riverside Park", &config);
        assert!(!a.region_found);
        assert_eq!(a.region, "riverside");
    }

    #[test]
    fn test_fallback_first_entry_wins() {
        let config = ProximityConfig {
            neighborhoods: vec!["oakland".to_string(), "rockridge".to_string()],
            ..empty_config()
        };

        let a = annotate(GeoPoint::new(0.0, 0.0), "Rockridge / Oakland", &config);
        assert_eq!(a.region, "oakland");
    }

    #[test]
    fn test_blank_neighborhood_never_matches() {
        let config = ProximityConfig {
            neighborhoods: vec!["".to_string(), "temescal".to_string()],
            ..empty_config()
        };

        let a = annotate(GeoPoint::new(0.0, 0.0), "somewhere in oakland", &config);
        assert!(a.region.is_empty());

        let a = annotate(GeoPoint::new(0.0, 0.0), "", &config);
        assert!(a.region.is_empty());

        let a = annotate(GeoPoint::new(0.0, 0.0), "Temescal", &config);
        assert_eq!(a.region, "temescal");
    }

    #[test]
    fn test_fallback_skipped_when_region_found() {
        let config = ProximityConfig {
            regions: vec![region("downtown", (10.0, 10.0), (20.0, 20.0))],
            neighborhoods: vec!["riverside".to_string()],
            ..empty_config()
        };

        let a = annotate(GeoPoint::new(15.0, 15.0), "riverside", &config);
        assert_eq!(a.region, "downtown");
    }

    #[test]
    fn test_overlapping_regions_last_match_wins() {
        let mut config = ProximityConfig {
            regions: vec![
                region("outer", (0.0, 0.0), (30.0, 30.0)),
                region("inner", (10.0, 10.0), (20.0, 20.0)),
                region("elsewhere", (50.0, 50.0), (60.0, 60.0)),
            ],
            ..empty_config()
        };

        let a = annotate(GeoPoint::new(15.0, 15.0), "", &config);
        assert_eq!(a.region, "inner");

        config.regions.swap(0, 1);
        let a = annotate(GeoPoint::new(15.0, 15.0), "", &config);
        assert_eq!(a.region, "outer");
    }

    #[test]
    fn test_point_on_region_edge_not_found() {
        let config = ProximityConfig {
            regions: vec![region("downtown", (10.0, 10.0), (20.0, 20.0))],
            ..empty_config()
        };
        let a = annotate(GeoPoint::new(10.0, 15.0), "", &config);
        assert!(!a.region_found);
        assert!(a.region.is_empty());
    }

    #[test]
    fn test_empty_points_of_interest() {
        let config = empty_config();
        for p in [GeoPoint::new(0.0, 0.0), GeoPoint::new(45.0, -120.0)] {
            let a = annotate(p, "", &config);
            assert_eq!(a.poi_distance_km, None);
            assert!(!a.near_poi);
            assert!(a.poi_name.is_empty());
        }
    }

    #[test]
    fn test_empty_config_is_vacuous() {
        let a = annotate(GeoPoint::new(1.0, 1.0), "anywhere", &empty_config());
        assert_eq!(a, Annotation::default());
    }

    #[test]
    fn test_poi_distance_is_minimum_even_when_far() {
        let config = ProximityConfig {
            points_of_interest: vec![poi("far", 0.0, 2.0), poi("farther", 0.0, 3.0)],
            ..empty_config()
        };
        let a = annotate(GeoPoint::new(0.0, 0.0), "", &config);
        assert!(!a.near_poi);
        assert!(a.poi_name.is_empty());
        assert_abs_diff_eq!(a.poi_distance_km.unwrap(), 222.2, epsilon = 1.0);
    }

    #[test]
    fn test_near_poi_must_improve_running_minimum() {
        // 0.005 deg is ~0.56 km, 0.008 deg ~0.89 km; both under threshold.
        let config = ProximityConfig {
            points_of_interest: vec![
                poi("closer", 0.0, 0.005),
                poi("further", 0.0, 0.008),
                poi("distant", 0.0, 1.0),
            ],
            ..empty_config()
        };
        let a = annotate(GeoPoint::new(0.0, 0.0), "", &config);
        assert!(a.near_poi);
        assert_eq!(a.poi_name, "closer");
        assert_abs_diff_eq!(a.poi_distance_km.unwrap(), 0.556, epsilon = 0.01);
    }

    #[test]
    fn test_near_poi_later_closer_candidate_replaces() {
        let config = ProximityConfig {
            points_of_interest: vec![
                poi("distant", 0.0, 1.0),
                poi("further", 0.0, 0.008),
                poi("closer", 0.0, 0.005),
            ],
            ..empty_config()
        };
        let a = annotate(GeoPoint::new(0.0, 0.0), "", &config);
        assert_eq!(a.poi_name, "closer");
    }

    #[test]
    fn test_poi_tie_keeps_first() {
        let config = ProximityConfig {
            points_of_interest: vec![poi("east", 0.0, 0.005), poi("west", 0.0, -0.005)],
            ..empty_config()
        };
        let a = annotate(GeoPoint::new(0.0, 0.0), "", &config);
        assert_eq!(a.poi_name, "east");
    }

    #[test]
    fn test_reference_far_still_records_distance() {
        let config = ProximityConfig {
            reference: Some(poi("work", 0.0, 1.0)),
            ..empty_config()
        };
        let a = annotate(GeoPoint::new(0.0, 0.0), "", &config);
        assert!(!a.near_reference);
        assert_abs_diff_eq!(a.reference_distance_km.unwrap(), 111.1, epsilon = 0.5);
    }

    #[test]
    fn test_annotate_listing_rejects_bad_geotag() {
        let listing = Listing {
            geotag: Some(json!(["abc", 1.0])),
            ..Default::default()
        };
        assert!(matches!(
            annotate_listing(&listing, &empty_config()),
            Err(InputError::MalformedGeotag(_))
        ));

        let missing = Listing::default();
        assert_eq!(
            annotate_listing(&missing, &empty_config()),
            Err(InputError::MissingGeotag)
        );
    }

    #[test]
    fn test_annotate_listing_uses_where_text() {
        let config = ProximityConfig {
            neighborhoods: vec!["temescal".to_string()],
            ..empty_config()
        };
        let listing = Listing {
            location: Some("TEMESCAL".to_string()),
            geotag: Some(json!([0.0, 0.0])),
            ..Default::default()
        };
        assert_eq!(annotate_listing(&listing, &config).unwrap().region, "temescal");
    }

    #[test]
    fn test_parallel_calls_share_config() {
        let config = ProximityConfig {
            regions: vec![region("downtown", (10.0, 10.0), (20.0, 20.0))],
            points_of_interest: vec![poi("market", 15.0, 15.0)],
            ..empty_config()
        };
        let expected = annotate(GeoPoint::new(15.0, 15.0), "", &config);

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| annotate(GeoPoint::new(15.0, 15.0), "", &config)))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }
}
