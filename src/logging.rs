//! Log callback system.
//!
//! The crate never prints. State transitions are reported through a single
//! process-wide callback that the embedding application installs, e.g. to
//! forward into `tracing` or a log pane.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    const fn to_u8(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warn,
            _ => Self::Error,
        }
    }
}

type LogCallback = Box<dyn Fn(LogLevel, &str, &str) + Send + Sync + 'static>;

static MIN_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info.to_u8());

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback.
///
/// The callback receives the level, a dotted target such as `menu.bar`,
/// and the message.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Set the minimum level that reaches the callback.
pub fn set_log_level(level: LogLevel) {
    MIN_LEVEL.store(level.to_u8(), Ordering::Relaxed);
}

/// Get the minimum level that reaches the callback.
#[must_use]
pub fn log_level() -> LogLevel {
    LogLevel::from_u8(MIN_LEVEL.load(Ordering::Relaxed))
}

/// Whether a message at `level` would be delivered.
///
/// Call sites use this to skip `format!` work on hot paths.
#[must_use]
pub fn log_enabled(level: LogLevel) -> bool {
    level >= log_level()
}

/// Emit a log record.
pub fn emit_log(level: LogLevel, target: &str, message: &str) {
    if !log_enabled(level) {
        return;
    }
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, target, message);
        }
    }
}
