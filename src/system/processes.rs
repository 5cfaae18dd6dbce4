//! Process enumeration and identity reads
//!
//! Lists the process ids the OS currently exposes and reads a single
//! process's display name and command-line vector through `sysinfo`.
//! Each read takes a fresh snapshot of just the requested process, so a
//! process that exits between enumeration and the read shows up as
//! `ProcessError::NotFound`.

use std::fmt;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

use crate::constants::NOT_FOUND_PID;

use super::error::{ProcessError, ProcessResult};

// ============================================================================
// Process Id
// ============================================================================

/// An OS-assigned process identifier.
///
/// Only meaningful while the process it names is alive; the OS reuses ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(u32);

impl ProcessId {
    /// Wraps a raw process id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The id of the calling process.
    pub fn current() -> Self {
        Self(std::process::id())
    }

    /// Returns the raw id.
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Converts to the `sysinfo` id, rejecting values the platform cannot
    /// represent as a process id.
    pub(crate) fn to_sysinfo(self) -> ProcessResult<Pid> {
        // pid_t is signed on unix; anything above i32::MAX wraps negative.
        #[cfg(unix)]
        if self.0 > i32::MAX as u32 {
            return Err(ProcessError::InvalidId {
                reason: "exceeds the platform pid range",
            });
        }
        Ok(Pid::from_u32(self.0))
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Lookup
// ============================================================================

/// Outcome of a query that may not produce a value.
///
/// `Unavailable` covers both "no such process" and "process exists but
/// could not be read"; the two are deliberately indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The value was read
    Found(T),
    /// No value could be produced
    Unavailable,
}

impl<T> Lookup<T> {
    /// Returns true for `Found`.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Converts into an `Option`.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::Unavailable,
        }
    }
}

impl Lookup<ProcessId> {
    /// Returns the raw pid, or `NOT_FOUND_PID` (-1) when nothing matched.
    pub fn legacy_pid(&self) -> i64 {
        match self {
            Lookup::Found(pid) => i64::from(pid.as_u32()),
            Lookup::Unavailable => NOT_FOUND_PID,
        }
    }
}

// ============================================================================
// Reads
// ============================================================================

/// Enumerates the ids of all processes visible to the caller.
///
/// Threads are left out: on Linux `sysinfo` lists each task next to its
/// process, and a thread id must never be returned as a process id.
///
/// Order follows whatever the OS (and `sysinfo`'s table) yields; it is not
/// sorted and differs between platforms and runs.
#[must_use]
pub fn enumerate_process_ids() -> Vec<ProcessId> {
    let mut sys = System::new();
    sys.refresh_processes_specifics(
        ProcessesToUpdate::All,
        true,
        ProcessRefreshKind::default(),
    );

    sys.processes()
        .iter()
        .filter(|(_, process)| process.thread_kind().is_none())
        .map(|(pid, _)| ProcessId::new(pid.as_u32()))
        .collect()
}

/// Refreshes a single process into `sys`, failing if it is not there.
pub(crate) fn refresh_one(
    sys: &mut System,
    pid: ProcessId,
    kind: ProcessRefreshKind,
) -> ProcessResult<Pid> {
    let raw = pid.to_sysinfo()?;
    sys.refresh_processes_specifics(ProcessesToUpdate::Some(&[raw]), true, kind);
    if sys.process(raw).is_some() {
        Ok(raw)
    } else {
        Err(ProcessError::NotFound)
    }
}

/// Reads the display name of a process (e.g. "sshd", "notepad.exe").
pub fn process_name(pid: ProcessId) -> ProcessResult<String> {
    let mut sys = System::new();
    let raw = refresh_one(&mut sys, pid, ProcessRefreshKind::default())?;
    let process = sys.process(raw).ok_or(ProcessError::NotFound)?;
    Ok(process.name().to_string_lossy().into_owned())
}

/// Reads the full command-line argument vector of a process.
///
/// Kernel threads and processes whose arguments the OS hides yield an
/// empty vector rather than an error.
pub fn process_command_line(pid: ProcessId) -> ProcessResult<Vec<String>> {
    let mut sys = System::new();
    let kind = ProcessRefreshKind::default().with_cmd(UpdateKind::Always);
    let raw = refresh_one(&mut sys, pid, kind)?;
    let process = sys.process(raw).ok_or(ProcessError::NotFound)?;
    Ok(process
        .cmd()
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect())
}
