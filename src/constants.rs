//! Centralized constants for the library and the reporter binary
//!
//! Sampling defaults, refresh bounds and display thresholds live here so
//! they are easy to find and modify.

use std::time::Duration;

// ============================================================================
// Application Info
// ============================================================================

/// Application name displayed in the report header
pub const DISPLAY_NAME: &str = "Process Resource Probe";

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Application version from Cargo.toml
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// CPU Sampling (milliseconds)
// ============================================================================

/// Default CPU sampling interval in milliseconds
pub const DEFAULT_SAMPLE_MS: u64 = 100;

/// Default CPU sampling interval
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(DEFAULT_SAMPLE_MS);

/// Minimum sampling interval accepted on the command line
pub const MIN_SAMPLE_MS: u64 = 10;

/// Maximum sampling interval accepted on the command line
pub const MAX_SAMPLE_MS: u64 = 10000;

// ============================================================================
// Watch Refresh Rate (milliseconds)
// ============================================================================

/// Default refresh interval in milliseconds
pub const DEFAULT_REFRESH_MS: u64 = 2000;

/// Minimum allowed refresh interval
pub const MIN_REFRESH_MS: u64 = 250;

/// Maximum allowed refresh interval
pub const MAX_REFRESH_MS: u64 = 10000;

// ============================================================================
// Lookups
// ============================================================================

/// Integer reported for a failed pid lookup by callers that still expect
/// the numeric sentinel
pub const NOT_FOUND_PID: i64 = -1;

/// Upper bound for a percentage reading
pub const MAX_PERCENT: f64 = 100.0;

// ============================================================================
// Report Layout
// ============================================================================

/// Width of the label column in the report
pub const LABEL_COL_WIDTH: usize = 14;

/// Maximum characters of a command line shown before truncation
pub const CMDLINE_DISPLAY_WIDTH: usize = 96;

// ============================================================================
// CPU Usage Thresholds (for coloring)
// ============================================================================

/// CPU usage threshold for red color (critical)
pub const CPU_THRESHOLD_CRITICAL: f64 = 80.0;

/// CPU usage threshold for yellow color (warning)
pub const CPU_THRESHOLD_WARNING: f64 = 50.0;

/// CPU usage threshold for cyan color (moderate)
pub const CPU_THRESHOLD_MODERATE: f64 = 20.0;
