//! Resource query facade
//!
//! Seven independent operations over a `MetricsProvider`. Each one reads
//! live OS state, and none of them returns an error: a process that cannot
//! be inspected (gone, access denied, bad id) collapses into one
//! `ProcessUnavailable` outcome and the operation substitutes its fallback.
//!
//! | operation                       | pid absent        | process unavailable |
//! |---------------------------------|-------------------|---------------------|
//! | `find_process_by_name`          | -                 | skipped             |
//! | `find_process_by_command_line`  | -                 | skipped             |
//! | `cpu_usage`                     | system CPU        | system CPU          |
//! | `memory_usage`                  | system memory     | system memory       |
//! | `handle_usage`                  | `Unavailable`     | `Unavailable`       |
//! | `name_for`                      | `Unavailable`     | `Unavailable`       |
//! | `command_line_for`              | `Unavailable`     | `Unavailable`       |
//!
//! CPU and memory fall back to an aggregate while the others do not.

use std::time::Duration;

use tracing::{debug, trace};

use crate::constants::MAX_PERCENT;
use crate::system::{
    Lookup, MetricsProvider, ProcessId, ProcessResult, ProcessUnavailable, SystemProvider,
};

/// Stateless facade over a metrics provider.
#[derive(Debug, Clone, Default)]
pub struct ResourceQuery<P = SystemProvider> {
    provider: P,
}

impl ResourceQuery<SystemProvider> {
    /// A facade over the live OS.
    pub fn system() -> Self {
        Self::new(SystemProvider)
    }
}

impl<P: MetricsProvider> ResourceQuery<P> {
    /// Wraps a provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Runs one provider read for `pid`, collapsing any failure.
    fn inspect<T>(
        &self,
        pid: ProcessId,
        what: &'static str,
        read: impl FnOnce(&P) -> ProcessResult<T>,
    ) -> Result<T, ProcessUnavailable> {
        read(&self.provider).map_err(|cause| {
            let err = ProcessUnavailable { pid, what, cause };
            debug!(%err, "process read failed");
            err
        })
    }

    /// Returns the first process (in OS enumeration order) whose name
    /// equals `name` when `exact`, or contains it otherwise.
    ///
    /// Processes whose name cannot be read are skipped.
    pub fn find_process_by_name(&self, name: &str, exact: bool) -> Lookup<ProcessId> {
        self.first_match("name", |provider, pid| {
            let candidate = provider.process_name(pid)?;
            Ok(if exact {
                candidate == name
            } else {
                candidate.contains(name)
            })
        })
    }

    /// Returns the first process whose full argument vector equals
    /// `cmdline` element by element.
    pub fn find_process_by_command_line<S: AsRef<str>>(&self, cmdline: &[S]) -> Lookup<ProcessId> {
        self.first_match("command line", |provider, pid| {
            let candidate = provider.process_command_line(pid)?;
            Ok(candidate.len() == cmdline.len()
                && candidate.iter().zip(cmdline).all(|(a, b)| a == b.as_ref()))
        })
    }

    fn first_match(
        &self,
        what: &'static str,
        mut matches: impl FnMut(&P, ProcessId) -> ProcessResult<bool>,
    ) -> Lookup<ProcessId> {
        for pid in self.provider.process_ids() {
            match matches(&self.provider, pid) {
                Ok(true) => return Lookup::Found(pid),
                Ok(false) => {}
                Err(cause) => trace!(%pid, what, %cause, "skipping unreadable process"),
            }
        }
        Lookup::Unavailable
    }

    /// CPU utilization over `interval`, divided by the logical core count.
    ///
    /// With no pid, or when the process cannot be sampled, the system-wide
    /// figure is returned instead. Blocks for about `interval` (twice when
    /// a failed process sample falls back to a system sample).
    pub fn cpu_usage(&self, pid: Option<ProcessId>, interval: Duration) -> f64 {
        let raw = match pid {
            None => self.provider.system_cpu_percent(interval),
            Some(pid) => self
                .inspect(pid, "cpu usage", |p| p.process_cpu_percent(pid, interval))
                .unwrap_or_else(|_| self.provider.system_cpu_percent(interval)),
        };
        let cores = self.provider.logical_cpu_count().max(1) as f64;
        clamp_percent(raw / cores)
    }

    /// Memory utilization in percent: the process's share of physical
    /// memory, or system-wide utilization with no pid or on failure.
    pub fn memory_usage(&self, pid: Option<ProcessId>) -> f64 {
        let raw = match pid {
            None => self.provider.system_memory_percent(),
            Some(pid) => self
                .inspect(pid, "memory usage", |p| p.process_memory_percent(pid))
                .unwrap_or_else(|_| self.provider.system_memory_percent()),
        };
        clamp_percent(raw)
    }

    /// Open handle/descriptor count. There is no system-wide figure, so an
    /// absent pid and an unreadable process both give `Unavailable`.
    pub fn handle_usage(&self, pid: Option<ProcessId>) -> Lookup<u64> {
        self.optional(pid, "handle count", |p, pid| p.process_handle_count(pid))
    }

    /// Display name of the process.
    pub fn name_for(&self, pid: Option<ProcessId>) -> Lookup<String> {
        self.optional(pid, "name", |p, pid| p.process_name(pid))
    }

    /// Command-line argument vector of the process.
    pub fn command_line_for(&self, pid: Option<ProcessId>) -> Lookup<Vec<String>> {
        self.optional(pid, "command line", |p, pid| p.process_command_line(pid))
    }

    fn optional<T>(
        &self,
        pid: Option<ProcessId>,
        what: &'static str,
        read: impl FnOnce(&P, ProcessId) -> ProcessResult<T>,
    ) -> Lookup<T> {
        let Some(pid) = pid else {
            return Lookup::Unavailable;
        };
        self.inspect(pid, what, |p| read(p, pid)).ok().into()
    }
}

/// Bounds a reading to 0-100; NaN (an empty sampling window) reads as 0.
fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_PERCENT)
    }
}

// ============================================================================
// Free functions over the live OS
// ============================================================================

/// See [`ResourceQuery::find_process_by_name`].
pub fn find_process_by_name(name: &str, exact: bool) -> Lookup<ProcessId> {
    ResourceQuery::system().find_process_by_name(name, exact)
}

/// See [`ResourceQuery::find_process_by_command_line`].
pub fn find_process_by_command_line<S: AsRef<str>>(cmdline: &[S]) -> Lookup<ProcessId> {
    ResourceQuery::system().find_process_by_command_line(cmdline)
}

/// See [`ResourceQuery::cpu_usage`]. Pass
/// [`DEFAULT_SAMPLE_INTERVAL`](crate::constants::DEFAULT_SAMPLE_INTERVAL)
/// for the usual 100 ms window.
pub fn cpu_usage(pid: Option<ProcessId>, interval: Duration) -> f64 {
    ResourceQuery::system().cpu_usage(pid, interval)
}

/// See [`ResourceQuery::memory_usage`].
pub fn memory_usage(pid: Option<ProcessId>) -> f64 {
    ResourceQuery::system().memory_usage(pid)
}

/// See [`ResourceQuery::handle_usage`].
pub fn handle_usage(pid: Option<ProcessId>) -> Lookup<u64> {
    ResourceQuery::system().handle_usage(pid)
}

/// See [`ResourceQuery::name_for`].
pub fn name_for(pid: Option<ProcessId>) -> Lookup<String> {
    ResourceQuery::system().name_for(pid)
}

/// See [`ResourceQuery::command_line_for`].
pub fn command_line_for(pid: Option<ProcessId>) -> Lookup<Vec<String>> {
    ResourceQuery::system().command_line_for(pid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::ProcessError;
    use std::cell::Cell;

    struct FakeProcess {
        pid: u32,
        name: ProcessResult<&'static str>,
        cmd: Vec<&'static str>,
        cpu: f64,
        memory: f64,
        handles: u64,
    }

    impl FakeProcess {
        fn new(pid: u32, name: &'static str, cmd: Vec<&'static str>) -> Self {
            Self {
                pid,
                name: Ok(name),
                cmd,
                cpu: 50.0,
                memory: 1.5,
                handles: 12,
            }
        }

        fn denied(pid: u32) -> Self {
            Self {
                name: Err(ProcessError::AccessDenied),
                ..Self::new(pid, "", vec![])
            }
        }
    }

    struct FakeProvider {
        processes: Vec<FakeProcess>,
        system_cpu: f64,
        system_memory: f64,
        cores: usize,
        system_cpu_calls: Cell<usize>,
    }

    impl FakeProvider {
        fn new(processes: Vec<FakeProcess>) -> Self {
            Self {
                processes,
                system_cpu: 40.0,
                system_memory: 63.0,
                cores: 4,
                system_cpu_calls: Cell::new(0),
            }
        }

        fn get(&self, pid: ProcessId) -> ProcessResult<&FakeProcess> {
            let process = self
                .processes
                .iter()
                .find(|p| p.pid == pid.as_u32())
                .ok_or(ProcessError::NotFound)?;
            process.name.clone()?;
            Ok(process)
        }
    }

    impl MetricsProvider for FakeProvider {
        fn process_ids(&self) -> Vec<ProcessId> {
            self.processes.iter().map(|p| ProcessId::new(p.pid)).collect()
        }

        fn process_name(&self, pid: ProcessId) -> ProcessResult<String> {
            Ok(self.get(pid)?.name.clone()?.to_string())
        }

        fn process_command_line(&self, pid: ProcessId) -> ProcessResult<Vec<String>> {
            Ok(self.get(pid)?.cmd.iter().map(|s| s.to_string()).collect())
        }

        fn process_cpu_percent(&self, pid: ProcessId, _interval: Duration) -> ProcessResult<f64> {
            Ok(self.get(pid)?.cpu)
        }

        fn system_cpu_percent(&self, _interval: Duration) -> f64 {
            self.system_cpu_calls.set(self.system_cpu_calls.get() + 1);
            self.system_cpu
        }

        fn logical_cpu_count(&self) -> usize {
            self.cores
        }

        fn process_memory_percent(&self, pid: ProcessId) -> ProcessResult<f64> {
            Ok(self.get(pid)?.memory)
        }

        fn system_memory_percent(&self) -> f64 {
            self.system_memory
        }

        fn process_handle_count(&self, pid: ProcessId) -> ProcessResult<u64> {
            Ok(self.get(pid)?.handles)
        }
    }

    fn query() -> ResourceQuery<FakeProvider> {
        ResourceQuery::new(FakeProvider::new(vec![
            FakeProcess::denied(1),
            FakeProcess::new(10, "init", vec!["/sbin/init"]),
            FakeProcess::new(20, "python3", vec!["python3", "server.py"]),
            FakeProcess::new(30, "python", vec!["python", "worker.py", "--fast"]),
        ]))
    }

    const MISSING: Option<ProcessId> = Some(ProcessId::new(999));

    #[test]
    fn test_find_by_name_exact_and_substring() {
        let q = query();
        assert_eq!(q.find_process_by_name("python", true), Lookup::Found(ProcessId::new(30)));
        // first in enumeration order wins
        assert_eq!(q.find_process_by_name("python", false), Lookup::Found(ProcessId::new(20)));
        assert_eq!(q.find_process_by_name("pyth", true), Lookup::Unavailable);
        assert_eq!(q.find_process_by_name("nginx", false), Lookup::Unavailable);
    }

    #[test]
    fn test_find_by_name_skips_unreadable_processes() {
        // pid 1 cannot be read; the empty needle would otherwise match it.
        assert_eq!(query().find_process_by_name("", false), Lookup::Found(ProcessId::new(10)));
    }

    #[test]
    fn test_find_by_command_line_matches_whole_vector() {
        let q = query();
        assert_eq!(
            q.find_process_by_command_line(&["python", "worker.py", "--fast"]),
            Lookup::Found(ProcessId::new(30))
        );
        assert_eq!(q.find_process_by_command_line(&["python", "worker.py"]), Lookup::Unavailable);
        assert_eq!(
            q.find_process_by_command_line(&["python worker.py --fast"]),
            Lookup::Unavailable
        );
        let owned = vec!["/sbin/init".to_string()];
        assert_eq!(q.find_process_by_command_line(&owned), Lookup::Found(ProcessId::new(10)));
    }

    #[test]
    fn test_not_found_sentinel() {
        assert_eq!(query().find_process_by_name("nginx", true).legacy_pid(), -1);
    }

    #[test]
    fn test_cpu_usage_divides_by_core_count() {
        let q = query();
        assert_eq!(q.cpu_usage(Some(ProcessId::new(20)), Duration::ZERO), 12.5);
        assert_eq!(q.cpu_usage(None, Duration::ZERO), 10.0);
    }

    #[test]
    fn test_cpu_usage_falls_back_to_system() {
        let q = query();
        assert_eq!(q.cpu_usage(MISSING, Duration::ZERO), q.cpu_usage(None, Duration::ZERO));
        assert_eq!(q.cpu_usage(Some(ProcessId::new(1)), Duration::ZERO), 10.0);
    }

    #[test]
    fn test_cpu_usage_samples_system_only_on_fallback() {
        let q = query();
        q.cpu_usage(Some(ProcessId::new(20)), Duration::ZERO);
        assert_eq!(q.provider().system_cpu_calls.get(), 0);
        q.cpu_usage(MISSING, Duration::ZERO);
        assert_eq!(q.provider().system_cpu_calls.get(), 1);
    }

    #[test]
    fn test_cpu_usage_never_exceeds_100() {
        let mut provider = FakeProvider::new(vec![FakeProcess {
            cpu: 900.0,
            ..FakeProcess::new(5, "spin", vec![])
        }]);
        provider.cores = 2;
        let q = ResourceQuery::new(provider);
        assert_eq!(q.cpu_usage(Some(ProcessId::new(5)), Duration::ZERO), 100.0);
    }

    #[test]
    fn test_cpu_usage_with_zero_cores_and_nan() {
        let mut provider = FakeProvider::new(vec![]);
        provider.cores = 0;
        provider.system_cpu = f64::NAN;
        let q = ResourceQuery::new(provider);
        assert_eq!(q.cpu_usage(None, Duration::ZERO), 0.0);
    }

    #[test]
    fn test_memory_usage_falls_back_to_system() {
        let q = query();
        assert_eq!(q.memory_usage(Some(ProcessId::new(20))), 1.5);
        assert_eq!(q.memory_usage(None), 63.0);
        assert_eq!(q.memory_usage(MISSING), q.memory_usage(None));
    }

    #[test]
    fn test_handle_usage_has_no_aggregate() {
        let q = query();
        assert_eq!(q.handle_usage(Some(ProcessId::new(10))), Lookup::Found(12));
        assert_eq!(q.handle_usage(None), Lookup::Unavailable);
        assert_eq!(q.handle_usage(MISSING), Lookup::Unavailable);
        assert_eq!(q.handle_usage(Some(ProcessId::new(1))), Lookup::Unavailable);
    }

    #[test]
    fn test_name_and_command_line() {
        let q = query();
        let pid = Some(ProcessId::new(20));
        assert_eq!(q.name_for(pid), Lookup::Found("python3".to_string()));
        assert_eq!(
            q.command_line_for(pid),
            Lookup::Found(vec!["python3".to_string(), "server.py".to_string()])
        );
        assert_eq!(q.name_for(None), Lookup::Unavailable);
        assert_eq!(q.command_line_for(None), Lookup::Unavailable);
        assert_eq!(q.name_for(MISSING), Lookup::Unavailable);
        assert_eq!(q.command_line_for(MISSING), Lookup::Unavailable);
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-3.0), 0.0);
        assert_eq!(clamp_percent(42.0), 42.0);
        assert_eq!(clamp_percent(f64::INFINITY), 100.0);
    }
}
