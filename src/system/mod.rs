//! System information module - Process identity, CPU, memory and handles
//!
//! This module provides the OS readings behind the query facade, grouped
//! by topic, and the `MetricsProvider` trait that ties them together.

pub mod cpu;
pub mod error;
pub mod handles;
pub mod memory;
pub mod processes;
pub mod provider;

pub use error::{ProcessError, ProcessResult, ProcessUnavailable};
pub use processes::{Lookup, ProcessId};
pub use provider::{MetricsProvider, SystemProvider};
