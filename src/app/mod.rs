//! Reporter application logic
//!
//! Resolves the requested target to a pid and gathers a report through
//! the query facade.

pub mod cli;
mod report;

use std::io;

use thiserror::Error;

use procprobe::{Lookup, MetricsProvider, ProcessId, ResourceQuery};

pub use report::ProcessReport;

use cli::{CliError, Target};

/// Errors that end the reporter
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Cli(#[from] CliError),

    #[error("no running process matches {0}")]
    NoMatch(String),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Turns a target into the pid to report on (`None` for system-wide).
pub fn resolve_target<P: MetricsProvider>(
    query: &ResourceQuery<P>,
    target: &Target,
) -> Result<Option<ProcessId>, AppError> {
    let (found, description) = match target {
        Target::System => return Ok(None),
        Target::Pid(pid) => return Ok(Some(*pid)),
        Target::Name { name, exact: true } => {
            (query.find_process_by_name(name, true), format!("name '{}'", name))
        }
        Target::Name { name, exact: false } => (
            query.find_process_by_name(name, false),
            format!("a name containing '{}'", name),
        ),
        Target::CommandLine(cmdline) => (
            query.find_process_by_command_line(cmdline),
            format!("command line {:?}", cmdline),
        ),
    };

    match found {
        Lookup::Found(pid) => Ok(Some(pid)),
        Lookup::Unavailable => Err(AppError::NoMatch(description)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_direct_targets() {
        let query = ResourceQuery::system();
        assert_eq!(resolve_target(&query, &Target::System).unwrap(), None);
        assert_eq!(
            resolve_target(&query, &Target::Pid(ProcessId::new(7))).unwrap(),
            Some(ProcessId::new(7))
        );
    }

    #[test]
    fn test_resolve_unmatched_name() {
        let query = ResourceQuery::system();
        let target = Target::Name {
            name: "no-such-process-\u{1f50d}".into(),
            exact: false,
        };
        assert!(matches!(
            resolve_target(&query, &target),
            Err(AppError::NoMatch(_))
        ));
    }
}
