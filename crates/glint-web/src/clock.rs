use glint_engine::Clock;

/// ISO-8601 timestamps from the browser's `Date`, so discovery records use
/// the same clock the rest of the page sees.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl Clock for JsClock {
    fn now_iso(&self) -> String {
        js_sys::Date::new_0().to_iso_string().into()
    }
}
