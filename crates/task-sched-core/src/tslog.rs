//! Leveled, context-aware debug output for the scheduler
//!
//! Provides thread-safe, worker-aware logging similar in spirit to the
//! kernel-style `printk` macros this crate's ambient stack is descended
//! from, minus the per-green-thread context the original carried (this
//! scheduler has no concept of cooperative threads, only worker threads).
//!
//! # Environment Variables
//!
//! - `TASKSCHED_LOG_LEVEL=<level>` - off/error/warn/info/debug/trace, or 0-5
//! - `TASKSCHED_LOG_TIME=1` - prefix each line with a nanosecond timestamp
//! - `TASKSCHED_FLUSH_LOG=1` - flush stderr after every line (useful when
//!   chasing a crash where buffered output would otherwise be lost)
//!
//! # Output Format
//!
//! Without timestamp: `[LEVEL] [w<worker>] message`
//! With timestamp:    `[LEVEL] [<ns>] [w<worker>] message`
//!
//! Examples:
//! - `[DEBUG] [w0] picked up job`
//! - `[INFO]  [12345678] [w2] worker idle`
//! - `[ERROR] [w--] not running on a scheduler worker thread`
//!
//! # Usage
//!
//! ```ignore
//! use task_sched_core::{tsdebug, tsinfo, tswarn, tserror};
//!
//! tsdebug!("picked up job {}", job_id);
//! tsinfo!("worker {} idle", worker_id);
//! tswarn!("unexpected state: {:?}", state);
//! tserror!("critical failure!");
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Instant;
use crate::env::env_get_bool;

/// Log levels (matches common conventions)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Off,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Off => "",
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Info => "[INFO] ",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Trace => "[TRACE]",
        }
    }
}

// Global configuration (initialized once)
static FLUSH_ENABLED: AtomicBool = AtomicBool::new(false);
static TIME_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static INITIALIZED: AtomicBool = AtomicBool::new(false);

// Start time for relative timestamps
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize logging from environment variables
///
/// Called automatically on first log, but can be called explicitly for
/// deterministic initialization.
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return; // Already initialized
    }

    START_TIME.get_or_init(Instant::now);

    FLUSH_ENABLED.store(env_get_bool("TASKSCHED_FLUSH_LOG", false), Ordering::Relaxed);
    TIME_ENABLED.store(env_get_bool("TASKSCHED_LOG_TIME", false), Ordering::Relaxed);

    if let Ok(val) = std::env::var("TASKSCHED_LOG_LEVEL") {
        let level = match val.to_lowercase().as_str() {
            "off" | "0" => LogLevel::Off,
            "error" | "1" => LogLevel::Error,
            "warn" | "2" => LogLevel::Warn,
            "info" | "3" => LogLevel::Info,
            "debug" | "4" => LogLevel::Debug,
            "trace" | "5" => LogLevel::Trace,
            _ => LogLevel::Info,
        };
        LOG_LEVEL.store(level as u8, Ordering::Relaxed);
    }
}

/// Check if flush is enabled
#[inline]
pub fn flush_enabled() -> bool {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
    FLUSH_ENABLED.load(Ordering::Relaxed)
}

/// Check if timestamp is enabled
#[inline]
pub fn time_enabled() -> bool {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
    TIME_ENABLED.load(Ordering::Relaxed)
}

/// Get current log level
#[inline]
pub fn log_level() -> LogLevel {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Set log level programmatically
pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Set flush mode programmatically
pub fn set_flush_enabled(enabled: bool) {
    FLUSH_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Set time display programmatically
pub fn set_time_enabled(enabled: bool) {
    TIME_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Check if a log level is enabled
#[inline]
pub fn level_enabled(level: LogLevel) -> bool {
    level as u8 <= log_level() as u8
}

/// Get elapsed nanoseconds since start (safe for any stack)
#[inline]
pub fn elapsed_ns() -> u64 {
    let start = START_TIME.get_or_init(Instant::now);
    start.elapsed().as_nanos() as u64
}

// Thread-local for worker ID (set by the runtime's worker loop)
thread_local! {
    static WORKER_ID: std::cell::Cell<Option<u32>> = const { std::cell::Cell::new(None) };
}

/// Set current worker ID for this thread (called by the scheduler's worker loop)
pub fn set_worker_id(id: u32) {
    WORKER_ID.with(|w| w.set(Some(id)));
}

/// Clear worker ID (called on worker thread exit)
pub fn clear_worker_id() {
    WORKER_ID.with(|w| w.set(None));
}

/// Get current worker ID
#[inline]
pub fn get_worker_id() -> Option<u32> {
    WORKER_ID.with(|w| w.get())
}

/// Format context string `[w<id>]`
fn format_context() -> String {
    match get_worker_id() {
        Some(id) => format!("[w{id}]"),
        None => "[w--]".to_string(),
    }
}

/// Internal: write and optionally flush (no context)
#[doc(hidden)]
pub fn _tsprint_impl(args: std::fmt::Arguments<'_>) {
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = handle.write_fmt(args);
    if flush_enabled() {
        let _ = handle.flush();
    }
}

/// Internal: write with newline and optionally flush (no context)
#[doc(hidden)]
pub fn _tsprintln_impl(args: std::fmt::Arguments<'_>) {
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = handle.write_fmt(args);
    let _ = handle.write_all(b"\n");
    if flush_enabled() {
        let _ = handle.flush();
    }
}

/// Internal: leveled print with context
#[doc(hidden)]
pub fn _tslog_impl(level: LogLevel, args: std::fmt::Arguments<'_>) {
    if !level_enabled(level) {
        return;
    }

    let stderr = std::io::stderr();
    let mut handle = stderr.lock();

    let _ = write!(handle, "{} ", level.prefix());

    if time_enabled() {
        let _ = write!(handle, "[{}] ", elapsed_ns());
    }

    let _ = write!(handle, "{} ", format_context());

    let _ = handle.write_fmt(args);
    let _ = handle.write_all(b"\n");

    if flush_enabled() {
        let _ = handle.flush();
    }
}

// ============================================================================
// Public Macros
// ============================================================================

/// Print to stderr (no newline, no context)
#[macro_export]
macro_rules! tsprint {
    ($($arg:tt)*) => {{
        $crate::tslog::_tsprint_impl(format_args!($($arg)*));
    }};
}

/// Print to stderr with newline (no context)
#[macro_export]
macro_rules! tsprintln {
    () => {{
        $crate::tslog::_tsprintln_impl(format_args!(""));
    }};
    ($($arg:tt)*) => {{
        $crate::tslog::_tsprintln_impl(format_args!($($arg)*));
    }};
}

/// Error level log with context
#[macro_export]
macro_rules! tserror {
    ($($arg:tt)*) => {{
        $crate::tslog::_tslog_impl(
            $crate::tslog::LogLevel::Error,
            format_args!($($arg)*)
        );
    }};
}

/// Warning level log with context
#[macro_export]
macro_rules! tswarn {
    ($($arg:tt)*) => {{
        $crate::tslog::_tslog_impl(
            $crate::tslog::LogLevel::Warn,
            format_args!($($arg)*)
        );
    }};
}

/// Info level log with context
#[macro_export]
macro_rules! tsinfo {
    ($($arg:tt)*) => {{
        $crate::tslog::_tslog_impl(
            $crate::tslog::LogLevel::Info,
            format_args!($($arg)*)
        );
    }};
}

/// Debug level log with context
#[macro_export]
macro_rules! tsdebug {
    ($($arg:tt)*) => {{
        $crate::tslog::_tslog_impl(
            $crate::tslog::LogLevel::Debug,
            format_args!($($arg)*)
        );
    }};
}

/// Trace level log with context
#[macro_export]
macro_rules! tstrace {
    ($($arg:tt)*) => {{
        $crate::tslog::_tslog_impl(
            $crate::tslog::LogLevel::Trace,
            format_args!($($arg)*)
        );
    }};
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }

    #[test]
    fn test_level_from_u8() {
        assert_eq!(LogLevel::from_u8(0), LogLevel::Off);
        assert_eq!(LogLevel::from_u8(1), LogLevel::Error);
        assert_eq!(LogLevel::from_u8(4), LogLevel::Debug);
        assert_eq!(LogLevel::from_u8(99), LogLevel::Trace);
    }

    #[test]
    fn test_worker_context() {
        assert_eq!(get_worker_id(), None);
        set_worker_id(5);
        assert_eq!(get_worker_id(), Some(5));
        clear_worker_id();
        assert_eq!(get_worker_id(), None);
    }

    #[test]
    fn test_elapsed_ns() {
        let t1 = elapsed_ns();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let t2 = elapsed_ns();
        assert!(t2 > t1);
    }

    #[test]
    fn test_macros_compile() {
        set_log_level(LogLevel::Off); // Suppress output during test

        tsprint!("test");
        tsprintln!("test {}", 42);
        tserror!("error {}", "msg");
        tswarn!("warn");
        tsinfo!("info");
        tsdebug!("debug");
        tstrace!("trace");
    }
}
