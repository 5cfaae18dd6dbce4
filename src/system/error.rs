//! Error types for process inspection
//!
//! `ProcessError` is what a metrics provider reports when it cannot read
//! a process. The query facade never hands it to callers: every variant
//! collapses into a single `ProcessUnavailable` outcome before a fallback
//! is substituted.

use thiserror::Error;

use super::ProcessId;

// ============================================================================
// Process Error
// ============================================================================

/// Errors a metrics provider can report for a single process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// Process does not exist or has already terminated
    #[error("process not found or has terminated")]
    NotFound,

    /// The OS refused to expose the requested information
    #[error("access denied")]
    AccessDenied,

    /// The identifier can never name a process on this platform
    #[error("invalid process id: {reason}")]
    InvalidId {
        /// Description of what was invalid
        reason: &'static str,
    },

    /// The reading is not available on this platform
    #[error("{what} is not supported on this platform")]
    Unsupported {
        /// Name of the unsupported reading
        what: &'static str,
    },

    /// An OS call failed with an error code
    #[error("{api} failed (error code: 0x{code:08X})")]
    Os {
        /// Name of the failing call
        api: &'static str,
        /// Raw OS error code
        code: i32,
    },
}

impl ProcessError {
    /// Classifies an I/O error raised while reading a process's OS entries.
    pub fn from_io(api: &'static str, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ProcessError::NotFound,
            std::io::ErrorKind::PermissionDenied => ProcessError::AccessDenied,
            _ => ProcessError::Os {
                api,
                code: err.raw_os_error().unwrap_or(0),
            },
        }
    }
}

// ============================================================================
// Process Unavailable
// ============================================================================

/// The single outcome of a failed inspection, as seen by the query facade.
///
/// Not-found, access-denied and invalid-id all land here; callers cannot
/// tell them apart. `cause` is kept for logging only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("process {pid} could not be inspected ({what}): {cause}")]
pub struct ProcessUnavailable {
    /// The process that was being inspected
    pub pid: ProcessId,
    /// Which reading was attempted
    pub what: &'static str,
    /// What the provider reported
    #[source]
    pub cause: ProcessError,
}

// ============================================================================
// Result type aliases
// ============================================================================

/// Result type for provider reads
pub type ProcessResult<T> = Result<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_errors_are_classified() {
        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(ProcessError::from_io("read_dir", &missing), ProcessError::NotFound);

        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(ProcessError::from_io("read_dir", &denied), ProcessError::AccessDenied);

        let other = io::Error::new(io::ErrorKind::Other, "device error");
        assert!(matches!(
            ProcessError::from_io("read_dir", &other),
            ProcessError::Os { api: "read_dir", code: 0 }
        ));
    }

    #[test]
    fn test_unavailable_message_names_pid() {
        let err = ProcessUnavailable {
            pid: ProcessId::new(42),
            what: "name",
            cause: ProcessError::NotFound,
        };
        let message = err.to_string();
        assert!(message.contains("42"));
        assert!(message.contains("name"));
    }
}
