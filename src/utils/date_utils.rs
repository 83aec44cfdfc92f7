use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveTime, Timelike};

/// Days of history shown before today on the employees page.
pub const HISTORY_DAYS: u64 = 6;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current wall-clock time truncated to whole seconds.
pub fn now_hms() -> NaiveTime {
    let now = Local::now().time();
    now.with_nanosecond(0).unwrap_or(now)
}

/// First and last day of the calendar month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date - Days::new(u64::from(date.day0()));
    let last = first
        .checked_add_months(Months::new(1))
        .map_or(NaiveDate::MAX, |next| next - Days::new(1));
    (first, last)
}

/// Inclusive window ending on `today`.
pub fn history_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Days::new(HISTORY_DAYS), today)
}
