//! portal-health: health and liveness endpoint for the portal web application.
//!
//! `GET /api/health` reports process uptime, memory, version, environment,
//! and whether the portal's base URL and tenant are configured. `HEAD` on the
//! same route is a cheap liveness probe.

pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod middleware;
pub mod report;
pub mod routes;
pub mod state;

pub use error::{ReportError, ReportFailure};
pub use routes::create_router;
pub use state::AppState;
