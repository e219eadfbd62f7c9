//! Application state for the web layer.

use std::sync::Arc;

use crate::dataset::DatasetSource;
use crate::validate::ValidatorConfig;

/// Shared application state.
///
/// Holds no validation results: every request loads its own snapshot.
#[derive(Clone)]
pub struct AppState {
    /// Where snapshots are loaded from
    pub source: Arc<dyn DatasetSource>,

    /// Validator thresholds
    pub config: Arc<ValidatorConfig>,
}

impl AppState {
    pub fn new(source: impl DatasetSource + 'static, config: ValidatorConfig) -> Self {
        Self::from_shared(Arc::new(source), config)
    }

    /// Build state around an already shared source.
    pub fn from_shared(source: Arc<dyn DatasetSource>, config: ValidatorConfig) -> Self {
        Self {
            source,
            config: Arc::new(config),
        }
    }
}
