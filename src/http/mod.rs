//! HTTP server module.
//!
//! Serves plain HTTP; TLS is expected to terminate at the ingress in front
//! of the application. Shuts down gracefully on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
