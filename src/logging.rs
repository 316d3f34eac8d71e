use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG: AtomicBool = AtomicBool::new(false);

pub fn set_debug(enabled: bool) {
    DEBUG.store(enabled, Ordering::Relaxed);
}

pub fn debug_enabled() -> bool {
    DEBUG.load(Ordering::Relaxed)
}

/// Prints a dimmed `DEBUG:` line to stderr when debug output is on.
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if $crate::logging::debug_enabled() {
            eprintln!(
                "{} {}",
                colored::Colorize::dimmed("DEBUG:"),
                format_args!($($arg)*)
            );
        }
    };
}

/// Prints a user-facing error in red to stderr.
macro_rules! report {
    ($($arg:tt)*) => {
        eprintln!(
            "{}",
            colored::Colorize::red(format!($($arg)*).as_str())
        )
    };
}
