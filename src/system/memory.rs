//! Memory utilization
//!
//! System-wide utilization and a single process's resident share of
//! physical memory, both as percentages.

use sysinfo::{ProcessRefreshKind, System};

use super::error::{ProcessError, ProcessResult};
use super::processes::refresh_one;
use super::ProcessId;

/// Converts a byte count into a percentage of `total`.
fn percent_of(bytes: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (bytes as f64 / total as f64) * 100.0
}

/// Gets the percentage of physical memory in use system-wide.
#[must_use]
pub fn system_memory_percent() -> f64 {
    let mut sys = System::new();
    sys.refresh_memory();
    percent_of(sys.used_memory(), sys.total_memory())
}

/// Gets a process's resident memory as a percentage of physical memory.
pub fn process_memory_percent(pid: ProcessId) -> ProcessResult<f64> {
    let mut sys = System::new();
    sys.refresh_memory();
    let raw = refresh_one(&mut sys, pid, ProcessRefreshKind::default().with_memory())?;

    let process = sys.process(raw).ok_or(ProcessError::NotFound)?;
    Ok(percent_of(process.memory(), sys.total_memory()))
}
