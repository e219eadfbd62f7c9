//! Referential and geometric integrity checks.
//!
//! Five independent validators each consume part of a [`Dataset`](crate::dataset::Dataset)
//! and produce one [`ValidationResult`]. [`run_validation`] runs them all and
//! merges the results into a [`ValidationReport`].
//!
//! Validators never fail: malformed records become findings, and checks
//! that depend on a malformed value are skipped for that record.

mod city;
mod config;
mod connection;
mod engine;
mod interchange;
mod issue;
mod line;
mod station;

pub use city::validate_cities;
pub use config::ValidatorConfig;
pub use connection::validate_connections;
pub use engine::{Status, ValidationReport, run_validation};
pub use interchange::{MIN_INTERCHANGE_LINES, validate_interchanges};
pub use issue::{Category, EntityCheck, Issue, Severity, ValidationResult};
pub use line::{MIN_STATIONS_PER_LINE, is_hex_color, validate_lines};
pub use station::validate_stations;
