//! Wall clock and local time zone from the JS runtime.

use messaging::clock::Clock;
use messaging::time_label::TimeLabeler;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> i64 {
        #[cfg(feature = "csr")]
        {
            js_sys::Date::now() as i64
        }
        #[cfg(not(feature = "csr"))]
        {
            messaging::clock::SystemClock.now_ms()
        }
    }
}

/// Labeler in the browser's current UTC offset.
#[must_use]
pub fn local_labeler() -> TimeLabeler {
    #[cfg(feature = "csr")]
    {
        // JS reports minutes *behind* UTC.
        #[allow(clippy::cast_possible_truncation)]
        let behind = js_sys::Date::new_0().get_timezone_offset() as i32;
        TimeLabeler::from_offset_minutes(-behind)
    }
    #[cfg(not(feature = "csr"))]
    {
        TimeLabeler::utc()
    }
}
