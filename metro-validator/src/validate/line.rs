//! Line checks.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{City, Line};

use super::issue::{Category, ValidationResult};

/// Minimum number of distinct stations a line must serve.
pub const MIN_STATIONS_PER_LINE: usize = 2;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

/// Returns true for `#RRGGBB` colors, either case.
pub fn is_hex_color(s: &str) -> bool {
    HEX_COLOR.is_match(s)
}

/// Validate every line against the known cities and its membership count.
///
/// A line missing from `station_counts` has no stations at all and gets
/// its own message; one present with fewer than the minimum gets another.
pub fn validate_lines(
    lines: &[Line],
    cities: &[City],
    station_counts: &HashMap<String, usize>,
) -> ValidationResult {
    let mut result = ValidationResult::new(Category::Line);
    let mut seen: HashSet<&str> = HashSet::new();
    let city_ids: HashSet<&str> = cities.iter().map(|c| c.id.as_str()).collect();

    for line in lines {
        result.check(&line.id, |c| {
            if !seen.insert(line.id.as_str()) {
                c.error("Duplicate line ID");
            }

            if !city_ids.contains(line.city_id.as_str()) {
                c.error(format!("CityID '{}' does not exist", line.city_id));
            }

            if line.name.trim().is_empty() {
                c.error("Line name is empty");
            }

            if !is_hex_color(&line.color) {
                c.error(format!(
                    "Invalid hex color '{}' (expected format: #RRGGBB)",
                    line.color
                ));
            }

            if line.display_order < 0 {
                c.warn(format!("Display order {} is negative", line.display_order));
            }

            match station_counts.get(&line.id) {
                None => c.error("Line has no stations"),
                Some(&count) if count < MIN_STATIONS_PER_LINE => c.error(format!(
                    "Line has only {count} station(s), minimum is {MIN_STATIONS_PER_LINE}"
                )),
                Some(_) => {}
            }
        });
    }

    debug!(
        passed = result.passed,
        failed = result.failed,
        warnings = result.warnings,
        "validated lines"
    );
    result
}
