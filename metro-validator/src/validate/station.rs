//! Station checks, including distance from the owning city's center.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{City, Coordinate, Station};

use super::config::ValidatorConfig;
use super::issue::{Category, ValidationResult};

/// Decoded center and display name for a city.
struct CityCenter<'a> {
    center: Coordinate,
    name: &'a str,
}

/// Index cities whose center decodes. Undecodable centers were already
/// reported by the city checks and are left out here.
fn index_city_centers(cities: &[City]) -> HashMap<&str, CityCenter<'_>> {
    cities
        .iter()
        .filter_map(|city| {
            city.center().ok().map(|center| {
                (
                    city.id.as_str(),
                    CityCenter {
                        center,
                        name: city.name.as_str(),
                    },
                )
            })
        })
        .collect()
}

/// Validate every station against its city.
pub fn validate_stations(
    stations: &[Station],
    cities: &[City],
    config: &ValidatorConfig,
) -> ValidationResult {
    let mut result = ValidationResult::new(Category::Station);
    let mut seen: HashSet<&str> = HashSet::new();
    let city_ids: HashSet<&str> = cities.iter().map(|c| c.id.as_str()).collect();
    let centers = index_city_centers(cities);

    for station in stations {
        result.check(&station.id, |c| {
            if !seen.insert(station.id.as_str()) {
                c.error("Duplicate station ID");
            }

            if !city_ids.contains(station.city_id.as_str()) {
                c.error(format!("CityID '{}' does not exist", station.city_id));
            }

            if station.name.trim().is_empty() {
                c.error("Station name is empty");
            }

            let coord = station.coordinate();
            let lat_ok = coord.latitude_in_domain();
            let lng_ok = coord.longitude_in_domain();
            if !lat_ok {
                c.error(format!("Latitude {:.6} out of range [-90, 90]", coord.lat));
            }
            if !lng_ok {
                c.error(format!("Longitude {:.6} out of range [-180, 180]", coord.lng));
            }

            if !config.region.contains(&coord) {
                c.warn(format!(
                    "Coordinates ({:.4}, {:.4}) appear to be outside the service region",
                    coord.lat, coord.lng
                ));
            }

            // Distance is meaningless for a point off the globe
            if !(lat_ok && lng_ok) {
                return;
            }

            if let Some(city) = centers.get(station.city_id.as_str()) {
                let distance = coord.distance_km(&city.center);
                if distance > config.max_distance_km {
                    c.error(format!(
                        "Station is {:.1} km from {} city center (max {}km)",
                        distance, city.name, config.max_distance_km
                    ));
                } else if distance > config.warn_distance_km {
                    c.warn(format!(
                        "Station is {:.1} km from {} city center",
                        distance, city.name
                    ));
                }
            }
        });
    }

    debug!(
        passed = result.passed,
        failed = result.failed,
        warnings = result.warnings,
        "validated stations"
    );
    result
}
