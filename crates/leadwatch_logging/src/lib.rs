#![deny(missing_docs)]
//! Shared logging utilities for the leadwatch workspace.
//!
//! This crate provides the `watch_*` logging macros used across the codebase,
//! a per-thread poll cycle marker and a minimal test initializer for the
//! global logger.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the poll cycle currently being processed.
    static POLL_CYCLE: Cell<u32> = const { Cell::new(0) };
}

/// Records the poll cycle being processed on the current thread.
/// The dispatcher sets this before handing a tick to the state machine.
pub fn set_poll_cycle(cycle: u32) {
    POLL_CYCLE.with(|v| v.set(cycle));
}

/// Returns the poll cycle last recorded on the current thread.
/// Returns 0 outside of tick processing.
pub fn poll_cycle() -> u32 {
    POLL_CYCLE.with(|v| v.get())
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! watch_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message prefixed with the current poll cycle.
#[macro_export]
macro_rules! watch_debug {
    ($($arg:tt)*) => {{
        log::debug!("[cycle {}] {}", $crate::poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! watch_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
