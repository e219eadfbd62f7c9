//! City checks.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::City;

use super::config::ValidatorConfig;
use super::issue::{Category, ValidationResult};

/// Validate every city.
///
/// A center that fails to decode is reported once and skips the
/// coordinate checks for that city.
pub fn validate_cities(cities: &[City], config: &ValidatorConfig) -> ValidationResult {
    let mut result = ValidationResult::new(Category::City);
    let mut seen: HashSet<&str> = HashSet::new();

    for city in cities {
        result.check(&city.id, |c| {
            if !seen.insert(city.id.as_str()) {
                c.error("Duplicate city ID");
            }

            match city.center() {
                Err(e) => c.error(format!("Invalid map_center JSON: {e}")),
                Ok(center) => {
                    if !center.latitude_in_domain() {
                        c.error(format!("Latitude {:.6} out of range [-90, 90]", center.lat));
                    }
                    if !center.longitude_in_domain() {
                        c.error(format!("Longitude {:.6} out of range [-180, 180]", center.lng));
                    }
                    if !config.region.contains(&center) {
                        c.warn(format!(
                            "Coordinates ({:.4}, {:.4}) appear to be outside the service region",
                            center.lat, center.lng
                        ));
                    }
                }
            }

            if !config.is_known_timezone(&city.timezone) {
                c.warn(format!("Timezone '{}' may not be valid", city.timezone));
            }

            if city.name.trim().is_empty() {
                c.error("City name is empty");
            }
            if city.display_name.trim().is_empty() {
                c.error("City display name is empty");
            }
        });
    }

    debug!(
        passed = result.passed,
        failed = result.failed,
        warnings = result.warnings,
        "validated cities"
    );
    result
}
