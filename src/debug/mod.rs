//! Debug utilities and helpers
//!
//! Layout tracing and invariant checks. Checks run only in debug builds or
//! when the `debug` feature is enabled; release builds skip them.

/// Debug mode feature flag
pub const DEBUG_MODE: bool = cfg!(debug_assertions) || cfg!(feature = "debug");

/// Debug log macro
///
/// Only logs in debug builds or when debug feature is enabled.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if $crate::debug::DEBUG_MODE {
            tracing::debug!($($arg)*);
        }
    };
}

/// Debug trace macro
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        if $crate::debug::DEBUG_MODE {
            tracing::trace!($($arg)*);
        }
    };
}

/// Validate a layout invariant
///
/// Logs an error when the invariant fails. Returns whether it held so callers
/// can fall back to a safe value.
pub fn validate_invariant(condition: bool, message: &str) -> bool {
    if DEBUG_MODE && !condition {
        tracing::error!("Invariant violation: {}", message);
    }
    condition
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_invariant_reports_outcome() {
        assert!(validate_invariant(true, "holds"));
        assert!(!validate_invariant(false, "fails"));
    }
}
