//! Presentation of validation runs.
//!
//! Both the CLI and the HTTP service build the same [`ValidationResponse`];
//! the console renderer is CLI-only.

pub mod console;
mod response;

pub use console::ConsoleOptions;
pub use response::{ErrorResponse, ValidationResponse};
