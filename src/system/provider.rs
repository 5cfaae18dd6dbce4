//! The seam between the query facade and the OS
//!
//! `MetricsProvider` lists every OS reading the facade needs. Per-process
//! reads are fallible; system-wide aggregates always produce a number.

use std::time::Duration;

use super::error::ProcessResult;
use super::{cpu, handles, memory, processes, ProcessId};

/// A source of process and system metrics.
pub trait MetricsProvider {
    /// Ids of all visible processes, in provider order.
    fn process_ids(&self) -> Vec<ProcessId>;

    /// Display name of a process.
    fn process_name(&self, pid: ProcessId) -> ProcessResult<String>;

    /// Command-line argument vector of a process.
    fn process_command_line(&self, pid: ProcessId) -> ProcessResult<Vec<String>>;

    /// Process CPU utilization over `interval`, summed across processors.
    fn process_cpu_percent(&self, pid: ProcessId, interval: Duration) -> ProcessResult<f64>;

    /// System CPU utilization over `interval`, 0-100.
    fn system_cpu_percent(&self, interval: Duration) -> f64;

    /// Number of logical processors.
    fn logical_cpu_count(&self) -> usize;

    /// Resident memory of a process as a percentage of physical memory.
    fn process_memory_percent(&self, pid: ProcessId) -> ProcessResult<f64>;

    /// Physical memory in use system-wide, 0-100.
    fn system_memory_percent(&self) -> f64;

    /// Open handle or descriptor count of a process.
    fn process_handle_count(&self, pid: ProcessId) -> ProcessResult<u64>;
}

/// Reads live OS state on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProvider;

impl MetricsProvider for SystemProvider {
    fn process_ids(&self) -> Vec<ProcessId> {
        processes::enumerate_process_ids()
    }

    fn process_name(&self, pid: ProcessId) -> ProcessResult<String> {
        processes::process_name(pid)
    }

    fn process_command_line(&self, pid: ProcessId) -> ProcessResult<Vec<String>> {
        processes::process_command_line(pid)
    }

    fn process_cpu_percent(&self, pid: ProcessId, interval: Duration) -> ProcessResult<f64> {
        cpu::sample_process_cpu(pid, interval)
    }

    fn system_cpu_percent(&self, interval: Duration) -> f64 {
        cpu::sample_system_cpu(interval)
    }

    fn logical_cpu_count(&self) -> usize {
        cpu::logical_cpu_count()
    }

    fn process_memory_percent(&self, pid: ProcessId) -> ProcessResult<f64> {
        memory::process_memory_percent(pid)
    }

    fn system_memory_percent(&self) -> f64 {
        memory::system_memory_percent()
    }

    fn process_handle_count(&self, pid: ProcessId) -> ProcessResult<u64> {
        handles::process_handle_count(pid)
    }
}
