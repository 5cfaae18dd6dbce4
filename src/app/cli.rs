//! Command-line argument parsing (manual implementation)

use thiserror::Error;

use procprobe::constants::{
    APP_NAME, APP_VERSION, DEFAULT_REFRESH_MS, DEFAULT_SAMPLE_MS, MAX_REFRESH_MS, MAX_SAMPLE_MS,
    MIN_REFRESH_MS, MIN_SAMPLE_MS,
};
use procprobe::ProcessId;

/// Which process the report is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// No process; system-wide figures only
    System,
    /// A pid given directly
    Pid(ProcessId),
    /// First process whose name matches
    Name {
        /// Name or name fragment
        name: String,
        /// Require the whole name to match
        exact: bool,
    },
    /// First process whose argument vector matches exactly
    CommandLine(Vec<String>),
}

/// Parsed command-line arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// Process to report on
    pub target: Target,
    /// CPU sampling interval in milliseconds
    pub interval: u64,
    /// Keep refreshing until the user quits
    pub watch: bool,
    /// Refresh interval in milliseconds for watch mode
    pub refresh: u64,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            target: Target::System,
            interval: DEFAULT_SAMPLE_MS,
            watch: false,
            refresh: DEFAULT_REFRESH_MS,
        }
    }
}

/// What the binary should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Produce a report
    Run(Args),
    /// Print help and exit
    Help,
    /// Print version and exit
    Version,
}

/// Argument errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("invalid value '{value}' for {flag}. Must be a number")]
    InvalidNumber { flag: &'static str, value: String },

    #[error("{flag} value {value} is out of range. Must be between {min} and {max}")]
    OutOfRange {
        flag: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("only one of --name, --pid and --cmdline may be given")]
    ConflictingTargets,

    #[error("--exact only applies together with --name")]
    ExactWithoutName,

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Help message
pub fn help_text() -> String {
    format!(
        "{name} {version}
Looks up a process and reports its CPU, memory and handle usage.

USAGE:
    {name} [OPTIONS]

OPTIONS:
    -n, --name <NAME>       Find the process whose name contains NAME
    -e, --exact             With --name, require the whole name to match
    -p, --pid <PID>         Report on a process id directly
    -c, --cmdline <ARG>...  Find the process whose command line is exactly
                            the remaining arguments
    -i, --interval <MS>     CPU sampling interval [default: {sample}]
                            Range: {sample_min}-{sample_max}
    -w, --watch             Refresh the report until q, Esc or Ctrl+C
    -r, --refresh <MS>      Watch refresh interval [default: {refresh}]
                            Range: {refresh_min}-{refresh_max}
    -h, --help              Print help information
    -V, --version           Print version information

With no target, only system-wide CPU and memory are reported.
Set RUST_LOG=debug to see why a process could not be read.

EXAMPLES:
    {name}                         System-wide usage
    {name} -n python               First process with 'python' in its name
    {name} -en sshd -w             Watch the process named exactly 'sshd'
    {name} -c python3 server.py    Process started as 'python3 server.py'",
        name = APP_NAME,
        version = APP_VERSION,
        sample = DEFAULT_SAMPLE_MS,
        sample_min = MIN_SAMPLE_MS,
        sample_max = MAX_SAMPLE_MS,
        refresh = DEFAULT_REFRESH_MS,
        refresh_min = MIN_REFRESH_MS,
        refresh_max = MAX_REFRESH_MS,
    )
}

/// Version line
pub fn version_text() -> String {
    format!("{} {}", APP_NAME, APP_VERSION)
}

/// Parse a number and check it against a range
fn parse_ranged(flag: &'static str, value: &str, min: u64, max: u64) -> Result<u64, CliError> {
    match value.parse::<u64>() {
        Ok(n) if (min..=max).contains(&n) => Ok(n),
        Ok(n) => Err(CliError::OutOfRange {
            flag,
            value: n,
            min,
            max,
        }),
        Err(_) => Err(CliError::InvalidNumber {
            flag,
            value: value.to_string(),
        }),
    }
}

fn parse_pid(value: &str) -> Result<ProcessId, CliError> {
    value
        .parse::<u32>()
        .map(ProcessId::new)
        .map_err(|_| CliError::InvalidNumber {
            flag: "--pid",
            value: value.to_string(),
        })
}

fn set_target(args: &mut Args, target: Target) -> Result<(), CliError> {
    if args.target != Target::System {
        return Err(CliError::ConflictingTargets);
    }
    args.target = target;
    Ok(())
}

/// Applies a `--key value` option.
fn apply_value(args: &mut Args, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "-n" | "--name" => set_target(
            args,
            Target::Name {
                name: value,
                exact: false,
            },
        ),
        "-p" | "--pid" => set_target(args, Target::Pid(parse_pid(&value)?)),
        "-i" | "--interval" => {
            args.interval = parse_ranged("--interval", &value, MIN_SAMPLE_MS, MAX_SAMPLE_MS)?;
            Ok(())
        }
        "-r" | "--refresh" => {
            args.refresh = parse_ranged("--refresh", &value, MIN_REFRESH_MS, MAX_REFRESH_MS)?;
            Ok(())
        }
        _ => Err(CliError::UnknownOption(key.to_string())),
    }
}

fn flag_name(key: &str) -> &'static str {
    match key {
        "-n" | "--name" => "--name",
        "-p" | "--pid" => "--pid",
        "-i" | "--interval" => "--interval",
        _ => "--refresh",
    }
}

/// Parse command-line arguments (without the program name)
pub fn parse_args<I>(argv: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args::default();
    let mut exact = false;
    let mut argv: Vec<String> = argv.into_iter().collect();
    argv.reverse();

    while let Some(arg) = argv.pop() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-e" | "--exact" => exact = true,
            "-w" | "--watch" => args.watch = true,

            "-n" | "--name" | "-p" | "--pid" | "-i" | "--interval" | "-r" | "--refresh" => {
                let value = argv.pop().ok_or(CliError::MissingValue(flag_name(&arg)))?;
                apply_value(&mut args, &arg, value)?;
            }

            // Everything after --cmdline is the command line itself
            "-c" | "--cmdline" => {
                let mut rest: Vec<String> = argv.drain(..).collect();
                rest.reverse();
                if rest.is_empty() {
                    return Err(CliError::MissingValue("--cmdline"));
                }
                set_target(&mut args, Target::CommandLine(rest))?;
            }

            // Handle --key=value syntax
            s if s.starts_with("--") && s.contains('=') => {
                let (key, value) = s.split_once('=').unwrap_or((s, ""));
                if key == "--cmdline" {
                    // The value is the first argument; re-queue as --cmdline VALUE ...
                    argv.push(value.to_string());
                    argv.push(key.to_string());
                } else {
                    apply_value(&mut args, key, value.to_string())?;
                }
            }

            // Handle combined short flags like -ew or -en NAME
            s if s.starts_with('-') && !s.starts_with("--") && s.len() > 2 => {
                // Split into individual flags and re-queue
                for c in s[1..].chars().rev() {
                    argv.push(format!("-{}", c));
                }
            }

            s if s.starts_with('-') => return Err(CliError::UnknownOption(s.to_string())),

            s => return Err(CliError::UnexpectedArgument(s.to_string())),
        }
    }

    if exact {
        match &mut args.target {
            Target::Name { exact: e, .. } => *e = true,
            _ => return Err(CliError::ExactWithoutName),
        }
    }

    Ok(Command::Run(args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, CliError> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    fn run(args: &[&str]) -> Args {
        match parse(args) {
            Ok(Command::Run(args)) => args,
            other => panic!("expected a run command, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(run(&[]), Args::default());
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-h"]), Ok(Command::Help));
        assert_eq!(parse(&["--version"]), Ok(Command::Version));
    }

    #[test]
    fn test_name_target() {
        let args = run(&["--name", "python"]);
        assert_eq!(
            args.target,
            Target::Name {
                name: "python".into(),
                exact: false
            }
        );
    }

    #[test]
    fn test_combined_short_flags() {
        let args = run(&["-ewn", "sshd"]);
        assert!(args.watch);
        assert_eq!(
            args.target,
            Target::Name {
                name: "sshd".into(),
                exact: true
            }
        );
    }

    #[test]
    fn test_key_value_syntax() {
        let args = run(&["--pid=42", "--interval=250"]);
        assert_eq!(args.target, Target::Pid(ProcessId::new(42)));
        assert_eq!(args.interval, 250);
    }

    #[test]
    fn test_cmdline_consumes_rest() {
        let args = run(&["-w", "--cmdline", "python3", "server.py", "--port", "80"]);
        assert!(args.watch);
        assert_eq!(
            args.target,
            Target::CommandLine(vec![
                "python3".into(),
                "server.py".into(),
                "--port".into(),
                "80".into()
            ])
        );
    }

    #[test]
    fn test_cmdline_key_value_starts_vector() {
        let args = run(&["--cmdline=python3", "server.py"]);
        assert_eq!(
            args.target,
            Target::CommandLine(vec!["python3".into(), "server.py".into()])
        );
        assert_eq!(
            run(&["--cmdline=sshd"]).target,
            Target::CommandLine(vec!["sshd".into()])
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse(&["--name"]), Err(CliError::MissingValue("--name")));
        assert_eq!(parse(&["--cmdline"]), Err(CliError::MissingValue("--cmdline")));
        assert_eq!(parse(&["-e"]), Err(CliError::ExactWithoutName));
        assert_eq!(parse(&["-p", "1", "-n", "x"]), Err(CliError::ConflictingTargets));
        assert!(matches!(parse(&["-p", "abc"]), Err(CliError::InvalidNumber { .. })));
        assert!(matches!(
            parse(&["-r", "5"]),
            Err(CliError::OutOfRange { flag: "--refresh", .. })
        ));
        assert_eq!(parse(&["--bogus"]), Err(CliError::UnknownOption("--bogus".into())));
        assert_eq!(parse(&["stray"]), Err(CliError::UnexpectedArgument("stray".into())));
    }
}
