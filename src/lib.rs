//! Process discovery and resource-usage queries
//!
//! Finds processes by name or command line and reads their CPU, memory,
//! handle count, name and arguments from the live OS. Failures to inspect
//! a process never surface as errors: each query substitutes a fallback
//! (a system-wide figure or [`Lookup::Unavailable`]).
//!
//! ```no_run
//! use procprobe::constants::DEFAULT_SAMPLE_INTERVAL;
//! use procprobe::{cpu_usage, find_process_by_name, name_for};
//!
//! let pid = find_process_by_name("sshd", true).found();
//! println!("name: {:?}", name_for(pid));
//! println!("cpu:  {:.1}%", cpu_usage(pid, DEFAULT_SAMPLE_INTERVAL));
//! ```

pub mod constants;
#[cfg(windows)]
mod ffi;
pub mod query;
pub mod system;

pub use query::{
    command_line_for, cpu_usage, find_process_by_command_line, find_process_by_name,
    handle_usage, memory_usage, name_for, ResourceQuery,
};
pub use system::{
    Lookup, MetricsProvider, ProcessError, ProcessId, ProcessResult, ProcessUnavailable,
    SystemProvider,
};
