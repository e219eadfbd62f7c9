//! HTTP server configuration.

use std::path::PathBuf;

use tracing::warn;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5001;

/// Environment variable that overrides the `--port` flag.
pub const PORT_ENV: &str = "PORT";

/// Frontends allowed to call the API from a browser.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173", // Vite dev server
    "http://localhost:3000",
    "http://localhost:4173", // Vite preview
    "https://where-is-my-metro-nine.vercel.app",
];

/// Configuration for the validation server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,

    /// Dataset snapshot to validate on every request.
    pub dataset: PathBuf,

    /// Origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn new(dataset: impl Into<PathBuf>) -> Self {
        Self {
            port: DEFAULT_PORT,
            dataset: dataset.into(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }
}

/// Pick the listening port. A non-empty `PORT` value wins over the flag, as
/// hosting platforms assign the port through the environment.
pub fn resolve_port(env_port: Option<&str>, flag: u16) -> u16 {
    match env_port.map(str::trim).filter(|p| !p.is_empty()) {
        None => flag,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(value = raw, fallback = flag, "ignoring unparseable {PORT_ENV}");
            flag
        }),
    }
}
