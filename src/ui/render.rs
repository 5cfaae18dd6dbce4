//! Report layout
//!
//! Lines end in "\r\n" so the same output works in raw mode (watch) and
//! on a normal terminal.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetAttribute, Attribute, SetForegroundColor},
};

use procprobe::constants::{CMDLINE_DISPLAY_WIDTH, DISPLAY_NAME, LABEL_COL_WIDTH};
use procprobe::Lookup;

use crate::app::ProcessReport;

use super::utils::{cpu_color, format_command_line, truncate_string};

const NOT_AVAILABLE: &str = "N/A";

/// Renders one labelled row.
fn render_row<W: Write>(out: &mut W, label: &str, value: &str, color: Color) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(Color::DarkGrey),
        Print(format!("{:<width$}", label, width = LABEL_COL_WIDTH)),
        SetForegroundColor(color),
        Print(value),
        ResetColor,
        Print("\r\n")
    )
}

fn lookup_text<T, F: FnOnce(&T) -> String>(value: &Lookup<T>, show: F) -> String {
    match value {
        Lookup::Found(v) => show(v),
        Lookup::Unavailable => NOT_AVAILABLE.to_string(),
    }
}

/// Writes the report and flushes `out`.
pub fn render_report<W: Write>(out: &mut W, report: &ProcessReport) -> io::Result<()> {
    let scope = match report.pid {
        Some(pid) => format!("pid {}", pid),
        None => "system-wide".to_string(),
    };
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        SetForegroundColor(Color::Cyan),
        Print(format!("{} ({})", DISPLAY_NAME, scope)),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print("\r\n")
    )?;

    if report.pid.is_some() {
        let name = lookup_text(&report.name, String::clone);
        let command = lookup_text(&report.command_line, |args| {
            truncate_string(&format_command_line(args), CMDLINE_DISPLAY_WIDTH)
        });
        render_row(out, "Name", &name, Color::White)?;
        render_row(out, "Command", &command, Color::White)?;
    }

    render_row(
        out,
        "CPU",
        &format!("{:5.1}%", report.cpu_percent),
        cpu_color(report.cpu_percent),
    )?;
    render_row(out, "Memory", &format!("{:5.1}%", report.memory_percent), Color::White)?;

    if report.pid.is_some() {
        let handles = lookup_text(&report.handles, u64::to_string);
        render_row(out, "Handles", &handles, Color::White)?;
    }

    if report.is_stale() {
        queue!(
            out,
            SetForegroundColor(Color::Yellow),
            Print("Process is no longer readable; CPU and memory show system-wide figures."),
            ResetColor,
            Print("\r\n")
        )?;
    }

    out.flush()
}
