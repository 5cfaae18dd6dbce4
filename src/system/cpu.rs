//! CPU usage sampling
//!
//! CPU usage requires delta measurements between two time points, so both
//! readings here take a first snapshot, sleep for the sampling interval on
//! the calling thread, and take a second. Nothing is carried between calls.

use std::thread;
use std::time::Duration;

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

use super::error::{ProcessError, ProcessResult};
use super::ProcessId;

/// Gets the number of logical processors.
#[must_use]
pub fn logical_cpu_count() -> usize {
    let mut sys = System::new();
    sys.refresh_cpu_usage();
    match sys.cpus().len() {
        0 => thread::available_parallelism().map_or(1, |n| n.get()),
        n => n,
    }
}

/// Samples system-wide CPU utilization over `interval`.
///
/// The value is the average over all logical processors, 0-100.
#[must_use]
pub fn sample_system_cpu(interval: Duration) -> f64 {
    let mut sys = System::new();
    sys.refresh_cpu_usage();
    thread::sleep(interval);
    sys.refresh_cpu_usage();
    f64::from(sys.global_cpu_usage())
}

/// Samples one process's CPU utilization over `interval`.
///
/// The value is summed across processors, so a process keeping two cores
/// busy reads 200.
///
/// Both snapshots refresh the whole process table: a single-pid refresh
/// leaves the CPU time of the calling process unaccounted on Linux and
/// reads 0 for it.
pub fn sample_process_cpu(pid: ProcessId, interval: Duration) -> ProcessResult<f64> {
    let raw = pid.to_sysinfo()?;
    let kind = ProcessRefreshKind::default().with_cpu();
    let mut sys = System::new();

    sys.refresh_processes_specifics(ProcessesToUpdate::All, true, kind);
    if sys.process(raw).is_none() {
        return Err(ProcessError::NotFound);
    }
    thread::sleep(interval);
    sys.refresh_processes_specifics(ProcessesToUpdate::All, true, kind);

    let process = sys.process(raw).ok_or(ProcessError::NotFound)?;
    Ok(f64::from(process.cpu_usage()))
}
