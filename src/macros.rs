//! Hot-path logging macros
//!
//! Per-frame and per-chunk diagnostics. They expand to `log` calls in debug
//! builds and compile away in release builds.

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! perf_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! perf_debug {
    ($($arg:tt)*) => {};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! perf_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! perf_trace {
    ($($arg:tt)*) => {};
}

/// Evaluate `$body` and log how long it took (debug builds only).
/// Works with `.await` inside async functions.
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! perf_time {
    ($label:expr, $body:expr) => {{
        let started = std::time::Instant::now();
        let value = $body;
        log::debug!("{} took {:?}", $label, started.elapsed());
        value
    }};
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! perf_time {
    ($label:expr, $body:expr) => {
        $body
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_perf_time_returns_value() {
        let value = crate::perf_time!("addition", 40 + 2);
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_perf_time_with_await() {
        let value = crate::perf_time!("async block", async { "done" }.await);
        assert_eq!(value, "done");
    }
}
