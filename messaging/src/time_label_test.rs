use super::*;

// 2026-10-18T12:00:00Z
const NOW: i64 = 1_792_324_800_000;

#[test]
fn under_a_minute_is_just_now() {
    let labeler = TimeLabeler::utc();
    assert_eq!(labeler.relative(NOW - 59_000, NOW), "Just now");
    assert_eq!(labeler.relative(NOW, NOW), "Just now");
}

#[test]
fn future_timestamps_read_as_just_now() {
    assert_eq!(TimeLabeler::utc().relative(NOW + 5 * MINUTE_MS, NOW), "Just now");
}

#[test]
fn minutes_hours_days_buckets() {
    let labeler = TimeLabeler::utc();
    assert_eq!(labeler.relative(NOW - 10 * MINUTE_MS, NOW), "10m ago");
    assert_eq!(labeler.relative(NOW - 59 * MINUTE_MS, NOW), "59m ago");
    assert_eq!(labeler.relative(NOW - HOUR_MS, NOW), "1h ago");
    assert_eq!(labeler.relative(NOW - 23 * HOUR_MS, NOW), "23h ago");
    assert_eq!(labeler.relative(NOW - 2 * DAY_MS, NOW), "2d ago");
    assert_eq!(labeler.relative(NOW - 6 * DAY_MS, NOW), "6d ago");
}

#[test]
fn older_than_a_week_shows_calendar_date() {
    // 2026-10-01T09:00:00Z
    let ts = 1_790_845_200_000;
    assert_eq!(TimeLabeler::utc().relative(ts, NOW), "Oct 1");
}

#[test]
fn previous_year_includes_the_year() {
    // 2025-03-04T09:00:00Z
    let ts = 1_741_078_800_000;
    assert_eq!(TimeLabeler::utc().relative(ts, NOW), "Mar 4, 2025");
}

#[test]
fn clock_uses_local_offset() {
    let utc = TimeLabeler::utc();
    assert_eq!(utc.clock(NOW), "12:00");
    let east = TimeLabeler::from_offset_minutes(90);
    assert_eq!(east.clock(NOW), "13:30");
    let west = TimeLabeler::from_offset_minutes(-300);
    assert_eq!(west.clock(NOW), "07:00");
}

#[test]
fn invalid_offset_falls_back_to_utc() {
    assert_eq!(TimeLabeler::from_offset_minutes(i32::MAX), TimeLabeler::utc());
}
