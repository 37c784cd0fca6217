use chrono::{SecondsFormat, Utc};

/// Source of ISO-8601 timestamps for discovery records.
///
/// Injected into the [`ProgressStore`](crate::progress::ProgressStore) so
/// that tests can pin time and the WASM bridge can substitute `js_sys::Date`.
pub trait Clock {
    /// Current moment as an ISO-8601 / RFC 3339 string.
    fn now_iso(&self) -> String;
}

/// Wall-clock time via chrono (native builds).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// A clock frozen at a fixed instant. Used by tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now_iso(&self) -> String {
        self.0.clone()
    }
}
