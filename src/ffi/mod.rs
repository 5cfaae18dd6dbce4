//! FFI module - Safe wrappers around Win32 process handles
//!
//! Provides an RAII wrapper so handles are closed via CloseHandle when they
//! go out of scope, and maps Win32 failures onto `ProcessError`.

mod handles;

pub use handles::ProcessHandle;

use windows::Win32::Foundation::{ERROR_ACCESS_DENIED, ERROR_INVALID_PARAMETER};

use crate::system::ProcessError;

/// Maps a Win32 error from `api` onto a `ProcessError`.
///
/// OpenProcess reports ERROR_INVALID_PARAMETER for a pid that names no
/// live process.
pub fn classify_error(api: &'static str, err: &windows::core::Error) -> ProcessError {
    let code = err.code();
    if code == ERROR_ACCESS_DENIED.to_hresult() {
        ProcessError::AccessDenied
    } else if code == ERROR_INVALID_PARAMETER.to_hresult() {
        ProcessError::NotFound
    } else {
        ProcessError::Os { api, code: code.0 }
    }
}
