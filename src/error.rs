use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::UNKNOWN_ERROR_MESSAGE;
use crate::report::HealthReport;

/// Failure while gathering process metrics for a health report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("{0}")]
    Uptime(String),

    #[error("{0}")]
    Memory(String),
}

impl ReportError {
    /// Message reported to the caller, never empty.
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// A report that could not be assembled, rendered as a 500 with an
/// `unhealthy` body.
#[derive(Debug)]
pub struct ReportFailure {
    pub error: ReportError,
    /// Version string resolved before assembly failed
    pub version: String,
}

impl IntoResponse for ReportFailure {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.error, "Health report assembly failed");

        let body = HealthReport::unhealthy(self.error.message(), self.version);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_passes_through() {
        let err = ReportError::Memory("boom".to_string());
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn test_empty_message_falls_back() {
        let err = ReportError::Uptime(String::new());
        assert_eq!(err.message(), UNKNOWN_ERROR_MESSAGE);

        let err = ReportError::Memory("   ".to_string());
        assert_eq!(err.message(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_failure_renders_internal_server_error() {
        let failure = ReportFailure {
            error: ReportError::Memory("boom".to_string()),
            version: "1.0.0".to_string(),
        };
        let response = failure.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
