// vim: tw=80
//! Structured events, compiled out unless the "tracing" feature is enabled.

cfg_if::cfg_if! {
    if #[cfg(feature = "tracing")] {
        macro_rules! trace_event {
            ($($arg:tt)+) => { ::tracing::trace!($($arg)+) }
        }

        macro_rules! debug_event {
            ($($arg:tt)+) => { ::tracing::debug!($($arg)+) }
        }
    } else {
        macro_rules! trace_event {
            ($($arg:tt)+) => {}
        }

        macro_rules! debug_event {
            ($($arg:tt)+) => {}
        }
    }
}
