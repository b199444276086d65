//! Shared application state for request handlers.

use std::env::VarError;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::{ProcessMetrics, SystemMetrics};

/// Looks up an environment variable, returning its value if set.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Read a variable from the process environment.
///
/// A set value that is not valid UTF-8 is still set: it is returned lossily
/// rather than treated as absent.
pub fn process_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
        Err(VarError::NotPresent) => None,
    }
}

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the configuration, the process metrics source, and the environment
/// lookup. Nothing here is mutated after start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub metrics: Arc<dyn ProcessMetrics>,
    pub env: EnvLookup,
}

impl AppState {
    /// Creates state backed by the live process and its environment.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            metrics: Arc::new(SystemMetrics::new()),
            env: Arc::new(process_env),
        }
    }

    /// Replace the metrics source.
    pub fn with_metrics(mut self, metrics: impl ProcessMetrics + 'static) -> Self {
        self.metrics = Arc::new(metrics);
        self
    }

    /// Replace the environment lookup.
    pub fn with_env(
        mut self,
        env: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env = Arc::new(env);
        self
    }
}
