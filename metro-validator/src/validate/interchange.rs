//! Interchange flag consistency.
//!
//! A station's `is_interchange` flag is a claim; the truth is how many
//! distinct lines it belongs to.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::Station;

use super::issue::{Category, ValidationResult};

/// Lines a station must serve to be a real interchange.
pub const MIN_INTERCHANGE_LINES: usize = 2;

/// Check every station's interchange flag against its line memberships.
///
/// An orphan station is an error regardless of its flag. A flagged orphan
/// gets both the over-claim error and the orphan error.
pub fn validate_interchanges(
    stations: &[Station],
    lines_per_station: &HashMap<String, HashSet<String>>,
) -> ValidationResult {
    let mut result = ValidationResult::new(Category::Interchange);

    for station in stations {
        let line_count = lines_per_station.get(&station.id).map_or(0, HashSet::len);

        result.check(&station.id, |c| {
            if station.is_interchange && line_count < MIN_INTERCHANGE_LINES {
                c.error(format!(
                    "Marked as interchange but only on {line_count} line(s)"
                ));
            }

            if !station.is_interchange && line_count >= MIN_INTERCHANGE_LINES {
                c.warn(format!(
                    "On {line_count} lines but not marked as interchange"
                ));
            }

            if line_count == 0 {
                c.error("Station is not assigned to any line (orphan)");
            }
        });
    }

    debug!(
        passed = result.passed,
        failed = result.failed,
        warnings = result.warnings,
        "validated interchanges"
    );
    result
}
