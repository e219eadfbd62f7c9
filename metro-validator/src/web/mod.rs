//! Web layer for the metro validator.
//!
//! Exposes validation as a JSON API for the admin frontend.

mod config;
mod dto;
mod routes;
mod state;

pub use config::{DEFAULT_ALLOWED_ORIGINS, DEFAULT_PORT, PORT_ENV, ServerConfig, resolve_port};
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
