//! Health report data model and assembly.
//!
//! A `HealthReport` is built fresh for every request from a `ProcessMetrics`
//! source and a `RuntimeEnv` snapshot, serialized, and dropped.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::config::{
    HealthConfig, APP_ENV_VAR, DEFAULT_APP_ENV, DEFAULT_APP_VERSION, VERSION_ENV_VAR,
};
use crate::error::ReportError;
use crate::metrics::{MemoryUsage, ProcessMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Whether a named configuration value is set. The value itself is never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfigPresence {
    #[serde(rename = "configured")]
    Configured,
    #[serde(rename = "not configured")]
    NotConfigured,
}

impl ConfigPresence {
    /// Set and non-empty counts as configured.
    pub fn of(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => ConfigPresence::Configured,
            _ => ConfigPresence::NotConfigured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Services {
    pub portal: PortalServices,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalServices {
    pub base_url: ConfigPresence,
    pub tenant_uuid: ConfigPresence,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    /// ISO-8601, millisecond precision, UTC
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryUsage>,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Services>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    /// Reduced report for the failure path: status, timestamp, error and version only.
    pub fn unhealthy(error: String, version: String) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            timestamp: now_iso8601(),
            uptime_seconds: None,
            memory: None,
            version,
            env: None,
            services: None,
            error: Some(error),
        }
    }
}

/// Environment values that feed a report, read once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnv {
    pub version: String,
    pub env: String,
    pub base_url: ConfigPresence,
    pub tenant_uuid: ConfigPresence,
}

impl RuntimeEnv {
    /// Resolve report inputs through `lookup`, which returns a variable's value if set.
    pub fn capture(lookup: &dyn Fn(&str) -> Option<String>, config: &HealthConfig) -> Self {
        Self {
            version: lookup(VERSION_ENV_VAR).unwrap_or_else(|| DEFAULT_APP_VERSION.to_string()),
            env: lookup(APP_ENV_VAR).unwrap_or_else(|| DEFAULT_APP_ENV.to_string()),
            base_url: ConfigPresence::of(lookup(config.base_url_var.as_str()).as_deref()),
            tenant_uuid: ConfigPresence::of(lookup(config.tenant_uuid_var.as_str()).as_deref()),
        }
    }
}

/// Build the full report, or the error that prevented it.
pub fn assemble(
    metrics: &dyn ProcessMetrics,
    runtime: &RuntimeEnv,
) -> Result<HealthReport, ReportError> {
    let timestamp = now_iso8601();
    let uptime = metrics.uptime()?;
    let memory = metrics.memory()?;

    Ok(HealthReport {
        status: HealthStatus::Healthy,
        timestamp,
        uptime_seconds: Some(uptime.as_secs_f64()),
        memory: Some(memory),
        version: runtime.version.clone(),
        env: Some(runtime.env.clone()),
        services: Some(Services {
            portal: PortalServices {
                base_url: runtime.base_url,
                tenant_uuid: runtime.tenant_uuid,
            },
        }),
        error: None,
    })
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
