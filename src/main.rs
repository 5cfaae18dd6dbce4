//! Process resource reporter
//!
//! Finds a process by pid, name or command line and prints its CPU,
//! memory and handle usage. With `--watch` the report refreshes in place
//! until the user quits.
//!
//! Controls (watch mode):
//! - q / Esc / Ctrl+C: Quit

mod app;
mod ui;

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing_subscriber::EnvFilter;

use procprobe::{ProcessId, ResourceQuery};

use app::cli::{self, Args, Command};
use app::{AppError, ProcessReport};
use ui::render_report;

fn main() -> ExitCode {
    init_tracing();

    let args = match cli::parse_args(env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{}", cli::help_text());
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("{}", cli::version_text());
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {}", err);
            eprintln!("For more information, try '--help'");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), AppError> {
    let query = ResourceQuery::system();
    let pid = app::resolve_target(&query, &args.target)?;
    tracing::debug!(?pid, "resolved target");

    let interval = Duration::from_millis(args.interval);
    if !args.watch {
        let report = ProcessReport::collect(&query, pid, interval);
        let mut stdout = io::stdout();
        render_report(&mut stdout, &report)?;
        return Ok(());
    }

    watch(&query, pid, interval, Duration::from_millis(args.refresh))
}

/// Redraws the report every `refresh` until the user quits.
fn watch(
    query: &ResourceQuery,
    pid: Option<ProcessId>,
    interval: Duration,
    refresh: Duration,
) -> Result<(), AppError> {
    let mut stdout = io::stdout();

    // Set up terminal
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = watch_loop(&mut stdout, query, pid, interval, refresh);

    // Restore terminal even if the loop failed
    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn watch_loop<W: Write>(
    out: &mut W,
    query: &ResourceQuery,
    pid: Option<ProcessId>,
    interval: Duration,
    refresh: Duration,
) -> Result<(), AppError> {
    loop {
        let started = Instant::now();
        let report = ProcessReport::collect(query, pid, interval);

        execute!(out, MoveTo(0, 0), Clear(ClearType::All))?;
        render_report(out, &report)?;

        // Wait out the rest of the refresh period, reacting to keys
        let deadline = started + refresh;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if timeout.is_zero() {
                break;
            }
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    // Only handle key PRESS events, ignore Release and Repeat
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}
