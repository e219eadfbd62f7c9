//! Data transfer objects for HTTP responses.

use serde::Serialize;

use crate::report::ValidationResponse;

/// Response for the health check.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Response for `/api/validate`: the shared aggregate plus a success flag.
#[derive(Debug, Serialize)]
pub struct ApiValidationResponse {
    /// False only when the status is `fail`
    pub success: bool,

    #[serde(flatten)]
    pub report: ValidationResponse,
}

impl From<ValidationResponse> for ApiValidationResponse {
    fn from(report: ValidationResponse) -> Self {
        Self {
            success: !report.status.is_fail(),
            report,
        }
    }
}
