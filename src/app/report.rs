//! A point-in-time report on one process (or the whole system)

use std::time::Duration;

use procprobe::{Lookup, MetricsProvider, ProcessId, ResourceQuery};

/// The readings shown by the reporter.
///
/// Gathered by independent queries, so the fields are not one atomic
/// snapshot: the process may change or exit between them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessReport {
    /// Target process, `None` for system-wide
    pub pid: Option<ProcessId>,
    /// Display name
    pub name: Lookup<String>,
    /// Argument vector
    pub command_line: Lookup<Vec<String>>,
    /// CPU %, normalized by core count
    pub cpu_percent: f64,
    /// Memory %
    pub memory_percent: f64,
    /// Open handles / descriptors
    pub handles: Lookup<u64>,
}

impl ProcessReport {
    /// Runs every query for `pid`. Blocks for at least `interval`.
    pub fn collect<P: MetricsProvider>(
        query: &ResourceQuery<P>,
        pid: Option<ProcessId>,
        interval: Duration,
    ) -> Self {
        Self {
            pid,
            name: query.name_for(pid),
            command_line: query.command_line_for(pid),
            cpu_percent: query.cpu_usage(pid, interval),
            memory_percent: query.memory_usage(pid),
            handles: query.handle_usage(pid),
        }
    }

    /// True when a pid was requested but its name could not be read,
    /// which usually means the process has exited.
    pub fn is_stale(&self) -> bool {
        self.pid.is_some() && !self.name.is_found()
    }
}
