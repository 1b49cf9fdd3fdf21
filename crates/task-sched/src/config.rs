//! Scheduler configuration

use task_sched_core::env::{env_get, env_get_bool};
use task_sched_core::error::{SchedError, SchedResult};
use task_sched_core::tslog::{self, LogLevel};

/// Builder-style configuration for [`crate::Scheduler`].
///
/// This is ambient plumbing, not a spec feature: it exists so callers can
/// build a `Scheduler` from environment-driven defaults the way
/// `gvthread-runtime::config::SchedulerConfig` does, but it never changes
/// scheduling semantics. `Scheduler::new` still takes a plain executor
/// count; `SchedulerConfig` is sugar for picking that count and wiring up
/// debug logging before construction.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Number of worker threads (defaults to `available_parallelism()`,
    /// overridable via `TASKSCHED_WORKERS`).
    pub num_executors: usize,

    /// Enable debug-level logging (overridable via `TASKSCHED_DEBUG_LOG`).
    pub debug_logging: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            num_executors: env_get("TASKSCHED_WORKERS", available),
            debug_logging: env_get_bool("TASKSCHED_DEBUG_LOG", false),
        }
    }
}

impl SchedulerConfig {
    /// Create a new configuration with environment-driven defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads.
    pub fn num_executors(mut self, n: usize) -> Self {
        self.num_executors = n;
        self
    }

    /// Enable or disable debug logging.
    pub fn debug_logging(mut self, enable: bool) -> Self {
        self.debug_logging = enable;
        self
    }

    /// Validate the configuration against the same bounds
    /// `Scheduler::new` enforces.
    pub fn validate(&self) -> SchedResult<()> {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        if self.num_executors == 0 {
            return Err(SchedError::TooFewExecutors);
        }
        if self.num_executors > available {
            return Err(SchedError::TooManyExecutors {
                requested: self.num_executors,
                available,
            });
        }
        Ok(())
    }

    pub(crate) fn apply_logging(&self) {
        if self.debug_logging {
            tslog::set_log_level(LogLevel::Debug);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reads_available_parallelism() {
        let cfg = SchedulerConfig::default();
        assert!(cfg.num_executors >= 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let cfg = SchedulerConfig::new().num_executors(1).debug_logging(true);
        assert_eq!(cfg.num_executors, 1);
        assert!(cfg.debug_logging);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_executors() {
        let cfg = SchedulerConfig::new().num_executors(0);
        assert_eq!(cfg.validate().unwrap_err(), SchedError::TooFewExecutors);
    }

    #[test]
    fn test_validate_rejects_too_many_executors() {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let cfg = SchedulerConfig::new().num_executors(available + 1000);
        assert!(matches!(
            cfg.validate().unwrap_err(),
            SchedError::TooManyExecutors { .. }
        ));
    }
}
