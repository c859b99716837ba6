//! Coarse relative time labels for thread and message lists.

#[cfg(test)]
#[path = "time_label_test.rs"]
mod time_label_test;

use time::UtcOffset;
use time::macros::format_description;

use crate::model::from_epoch_ms;

pub const MINUTE_MS: i64 = 60_000;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;

/// Formats timestamps in the viewer's local offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeLabeler {
    offset: UtcOffset,
}

impl Default for TimeLabeler {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimeLabeler {
    #[must_use]
    pub fn utc() -> Self {
        Self { offset: UtcOffset::UTC }
    }

    #[must_use]
    pub fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// Build from minutes east of UTC. Invalid offsets fall back to UTC.
    #[must_use]
    pub fn from_offset_minutes(minutes: i32) -> Self {
        let offset = UtcOffset::from_whole_seconds(minutes.saturating_mul(60)).unwrap_or(UtcOffset::UTC);
        Self { offset }
    }

    /// "Just now", "5m ago", "3h ago", "2d ago", then a calendar date.
    ///
    /// Timestamps in the future (clock skew) read as "Just now".
    #[must_use]
    pub fn relative(&self, ts_ms: i64, now_ms: i64) -> String {
        let elapsed = now_ms.saturating_sub(ts_ms);
        if elapsed < MINUTE_MS {
            return "Just now".to_owned();
        }
        if elapsed < HOUR_MS {
            return format!("{}m ago", elapsed / MINUTE_MS);
        }
        if elapsed < DAY_MS {
            return format!("{}h ago", elapsed / HOUR_MS);
        }
        if elapsed < WEEK_MS {
            return format!("{}d ago", elapsed / DAY_MS);
        }
        self.calendar_date(ts_ms, now_ms)
    }

    /// "Mar 4", or "Mar 4, 2025" when the year differs from now.
    #[must_use]
    pub fn calendar_date(&self, ts_ms: i64, now_ms: i64) -> String {
        let ts = from_epoch_ms(ts_ms).to_offset(self.offset);
        let now = from_epoch_ms(now_ms).to_offset(self.offset);
        let formatted = if ts.year() == now.year() {
            ts.format(format_description!("[month repr:short] [day padding:none]"))
        } else {
            ts.format(format_description!("[month repr:short] [day padding:none], [year]"))
        };
        formatted.unwrap_or_else(|_| ts.date().to_string())
    }

    /// "HH:MM" wall-clock time for message bubbles.
    #[must_use]
    pub fn clock(&self, ts_ms: i64) -> String {
        let ts = from_epoch_ms(ts_ms).to_offset(self.offset);
        format!("{:02}:{:02}", ts.hour(), ts.minute())
    }
}
