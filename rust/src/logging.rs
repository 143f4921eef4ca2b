//! Verbosity-gated logging for the scheduling and projection engines.
//!
//! Disabled levels compile down to a single integer comparison, so the engines
//! can log freely on hot paths. Levels:
//! - 0: SILENT
//! - 1: SUMMARY (one line per engine run, cycle detection)
//! - 2: PASSES (forward/backward pass results, cutoff decisions)
//! - 3: TRACE (every node visit)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_PASSES: u8 = 2;
pub const VERBOSITY_TRACE: u8 = 3;

/// Log at SUMMARY level (verbosity >= 1).
#[macro_export]
macro_rules! log_summary {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_SUMMARY {
            eprintln!("[medicao] {}", format_args!($($arg)*));
        }
    };
}

/// Log at PASSES level (verbosity >= 2).
#[macro_export]
macro_rules! log_passes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PASSES {
            eprintln!("[medicao]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at TRACE level (verbosity >= 3).
#[macro_export]
macro_rules! log_trace {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_TRACE {
            eprintln!("[medicao]     {}", format_args!($($arg)*));
        }
    };
}
