//! Health check endpoint for container orchestration.
//!
//! `GET` returns a detailed JSON report of process uptime, memory, version,
//! environment, and configuration presence. `HEAD` is a liveness probe that
//! only checks the process can respond to HTTP.

use axum::{extract::State, http::StatusCode, Json};

use crate::error::ReportFailure;
use crate::report::{self, HealthReport, RuntimeEnv};
use crate::state::AppState;

/// Detailed health report.
///
/// Responds 200 with a `healthy` report, or 500 with an `unhealthy` one
/// carrying the error message when process metrics cannot be read.
pub async fn detailed(
    State(state): State<AppState>,
) -> Result<Json<HealthReport>, ReportFailure> {
    let runtime = RuntimeEnv::capture(state.env.as_ref(), &state.config.health);

    match report::assemble(state.metrics.as_ref(), &runtime) {
        Ok(report) => {
            tracing::debug!(
                env = %runtime.env,
                version = %runtime.version,
                "Health report assembled"
            );
            Ok(Json(report))
        }
        Err(error) => Err(ReportFailure {
            error,
            version: runtime.version,
        }),
    }
}

/// Liveness probe: empty 200, no data gathering.
pub async fn probe() -> StatusCode {
    StatusCode::OK
}
