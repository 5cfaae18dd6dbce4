//! Utility functions for UI rendering

use crossterm::style::Color;

use procprobe::constants::{CPU_THRESHOLD_CRITICAL, CPU_THRESHOLD_MODERATE, CPU_THRESHOLD_WARNING};

/// Truncates a string to fit within a given width.
///
/// If the string exceeds `max_len` characters, it is truncated and "..."
/// is appended.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Joins an argument vector for display, quoting arguments that contain
/// whitespace or are empty.
#[must_use]
pub fn format_command_line(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                format!("\"{}\"", arg.replace('"', "\\\""))
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns a color based on CPU usage percentage for visual indication.
///
/// # Color Thresholds
/// * Red - Critical usage (≥80%)
/// * Yellow - Warning level (≥50%)
/// * Cyan - Moderate usage (≥20%)
/// * Green - Low usage (<20%)
#[must_use]
pub fn cpu_color(percent: f64) -> Color {
    if percent >= CPU_THRESHOLD_CRITICAL {
        Color::Red
    } else if percent >= CPU_THRESHOLD_WARNING {
        Color::Yellow
    } else if percent >= CPU_THRESHOLD_MODERATE {
        Color::Cyan
    } else {
        Color::Green
    }
}
