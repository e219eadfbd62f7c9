//! Metro network data validator.
//!
//! Checks the referential and geometric integrity of a metro dataset:
//! cities, lines, stations, line memberships and station connections.
//! Results are available on the console, as JSON, or over HTTP.

pub mod dataset;
pub mod domain;
pub mod report;
pub mod validate;
pub mod web;
