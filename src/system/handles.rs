//! Open handle / file descriptor counts
//!
//! Windows reports kernel object handles via GetProcessHandleCount. Linux
//! has no handle table, so the count of open file descriptors under
//! `/proc/<pid>/fd` stands in. Other platforms report `Unsupported`.

use super::error::ProcessResult;
#[cfg(not(any(windows, target_os = "linux")))]
use super::error::ProcessError;
use super::ProcessId;

/// Gets the handle count for a process.
///
/// # Arguments
/// * `pid` - The process ID to query
///
/// # Returns
/// * `Ok(u64)` - Number of open handles or descriptors
/// * `Err` - If the process is gone, inaccessible, or the platform has no
///   such counter
#[cfg(windows)]
pub fn process_handle_count(pid: ProcessId) -> ProcessResult<u64> {
    use windows::Win32::System::Threading::PROCESS_QUERY_LIMITED_INFORMATION;

    use crate::ffi::{classify_error, ProcessHandle};

    let handle = ProcessHandle::open(pid.as_u32(), PROCESS_QUERY_LIMITED_INFORMATION)
        .map_err(|e| classify_error("OpenProcess", &e))?;
    let count = handle
        .handle_count()
        .map_err(|e| classify_error("GetProcessHandleCount", &e))?;
    Ok(u64::from(count))
}

#[cfg(target_os = "linux")]
pub fn process_handle_count(pid: ProcessId) -> ProcessResult<u64> {
    use super::error::ProcessError;

    let raw = pid.to_sysinfo()?;
    let dir = format!("/proc/{}/fd", raw);
    let entries = std::fs::read_dir(&dir).map_err(|e| ProcessError::from_io("read_dir", &e))?;

    let mut count = 0u64;
    for entry in entries {
        // An fd closing mid-scan is not an error.
        if entry.is_ok() {
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(not(any(windows, target_os = "linux")))]
pub fn process_handle_count(_pid: ProcessId) -> ProcessResult<u64> {
    Err(ProcessError::Unsupported {
        what: "handle count",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(any(windows, target_os = "linux"))]
    #[test]
    fn test_current_process_handles() {
        let count = process_handle_count(ProcessId::current())
            .expect("Should count our own handles");
        assert!(count > 0, "Should have some handles");
    }

    #[cfg(any(windows, target_os = "linux"))]
    #[test]
    fn test_missing_process_handles() {
        assert!(process_handle_count(ProcessId::new(i32::MAX as u32)).is_err());
    }
}
