#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Shared test helper; not every integration test uses every fixture

pub mod canvas;
pub mod fixtures;
pub mod observer;

use opentui_menu::logging::{LogLevel, set_log_callback, set_log_level};
use tracing::Level;

/// Route menu log records into `tracing` and install a test subscriber.
///
/// Run with `--nocapture` to see the transitions of a failing test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
    set_log_level(LogLevel::Debug);
    set_log_callback(|level, target, message| match level {
        LogLevel::Debug => tracing::debug!(menu_target = target, "{message}"),
        LogLevel::Info => tracing::info!(menu_target = target, "{message}"),
        LogLevel::Warn => tracing::warn!(menu_target = target, "{message}"),
        LogLevel::Error => tracing::error!(menu_target = target, "{message}"),
    });
}
