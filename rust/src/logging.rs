//! Verbosity-gated diagnostics for the simulator.
//!
//! Everything here goes to stderr so it never interleaves with the report on
//! stdout. Levels:
//! - 0: SILENT (errors only, reported by the caller)
//! - 1: EVENTS (dispatches, idle jumps, completions)
//! - 2: CHECKS (candidate selection, dropped input rows)
//! - 3: DEBUG (ready-queue contents, re-queue batches)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_EVENTS: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at EVENTS level (verbosity >= 1).
#[macro_export]
macro_rules! log_events {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_EVENTS {
            eprintln!("[cpusched] {}", format_args!($($arg)*));
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!("[cpusched]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[cpusched]     {}", format_args!($($arg)*));
        }
    };
}

/// Clamp a user-supplied verbosity (e.g. a count of `-v` flags) to the
/// highest defined level.
pub fn clamp_verbosity(requested: usize) -> u8 {
    requested.min(VERBOSITY_DEBUG as usize) as u8
}
