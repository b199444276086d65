//! Process introspection for the health report.
//!
//! `ProcessMetrics` is the seam between report assembly and the platform.
//! `SystemMetrics` answers from the live process through `sysinfo`; tests
//! substitute their own source to force failures.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use sysinfo::{Process, ProcessRefreshKind, ProcessesToUpdate, System};

use crate::error::ReportError;

/// Memory usage of the current process, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryUsage {
    /// Resident set size
    pub rss: u64,
    /// Virtual memory size
    #[serde(rename = "virtual")]
    pub virtual_memory: u64,
}

/// Source of process uptime and memory statistics.
pub trait ProcessMetrics: Send + Sync {
    /// Time elapsed since the process started.
    fn uptime(&self) -> Result<Duration, ReportError>;

    /// Current memory usage of the process.
    fn memory(&self) -> Result<MemoryUsage, ReportError>;
}

/// Metrics read from the running process on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMetrics;

impl SystemMetrics {
    pub fn new() -> Self {
        Self
    }
}

/// Refresh the current process only and read from it.
///
/// A full scan walks every pid on the host.
fn with_current_process<T>(
    kind: ProcessRefreshKind,
    read: impl FnOnce(&Process) -> Result<T, String>,
) -> Result<T, String> {
    let pid =
        sysinfo::get_current_pid().map_err(|e| format!("Cannot resolve current pid: {}", e))?;

    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessesToUpdate::Some(&[pid]), true, kind);

    let process = sys
        .process(pid)
        .ok_or_else(|| format!("Process {} not visible", pid))?;
    read(process)
}

impl ProcessMetrics for SystemMetrics {
    fn uptime(&self) -> Result<Duration, ReportError> {
        with_current_process(ProcessRefreshKind::nothing(), |process| {
            // start_time has whole-second resolution
            let started = UNIX_EPOCH + Duration::from_secs(process.start_time());
            SystemTime::now()
                .duration_since(started)
                .map_err(|e| format!("Process start time is in the future: {}", e))
        })
        .map_err(ReportError::Uptime)
    }

    fn memory(&self) -> Result<MemoryUsage, ReportError> {
        with_current_process(ProcessRefreshKind::nothing().with_memory(), |process| {
            Ok(MemoryUsage {
                rss: process.memory(),
                virtual_memory: process.virtual_memory(),
            })
        })
        .map_err(ReportError::Memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_is_monotonic() {
        let metrics = SystemMetrics::new();
        let first = metrics.uptime().unwrap();
        std::thread::sleep(Duration::from_millis(5));
        let second = metrics.uptime().unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_uptime_counts_from_process_start() {
        // A source created later still reports the same process age
        let early = SystemMetrics::new().uptime().unwrap();
        std::thread::sleep(Duration::from_millis(20));
        let late = SystemMetrics::new().uptime().unwrap();
        assert!(late >= early + Duration::from_millis(20));
    }

    #[test]
    fn test_memory_reports_resident_set() {
        let metrics = SystemMetrics::new();
        let memory = metrics.memory().unwrap();
        assert!(memory.rss > 0);
    }

    #[test]
    fn test_memory_serializes_virtual_key() {
        let memory = MemoryUsage {
            rss: 1024,
            virtual_memory: 4096,
        };
        let json = serde_json::to_value(memory).unwrap();
        assert_eq!(json["rss"], 1024);
        assert_eq!(json["virtual"], 4096);
    }
}
