//! Date labelling for history display.
//!
//! All display-side date logic uses the local civil date; aggregates
//! (streaks, ranks) are computed server-side from stored dates and are
//! never re-derived here.

use chrono::{Datelike, Local, NaiveDate};

/// The local civil date, used both for labelling and for dating new
/// records.
#[must_use]
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Label a date relative to today: "Today", "Yesterday", the weekday name
/// within the last week, otherwise a short date.
#[must_use]
pub fn day_label(date: NaiveDate) -> String {
    day_label_on(date, today_local())
}

/// Label a date relative to an explicit reference day.
#[must_use]
pub fn day_label_on(date: NaiveDate, today: NaiveDate) -> String {
    let days_ago = (today - date).num_days();

    match days_ago {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => weekday_name(date),
        _ if date.year() == today.year() => date.format("%-d %b").to_string(),
        _ => date.format("%-d %b %Y").to_string(),
    }
}

fn weekday_name(date: NaiveDate) -> String {
    match date.weekday() {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
    .to_string()
}
