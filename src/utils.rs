use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};

pub const DRAW_DATE_FORMAT: &str = "%Y-%m-%d";

/// Weekdays on which draws take place.
pub const DRAW_DAYS: [Weekday; 2] = [Weekday::Wed, Weekday::Sat];

pub fn format_draw_date(date: NaiveDate) -> String {
    date.format(DRAW_DATE_FORMAT).to_string()
}

pub fn parse_draw_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DRAW_DATE_FORMAT).ok()
}

/// Reduces the date formats the data source is known to emit to a UTC calendar date.
/// Floating timestamps such as `2021-05-15T00:00:00.000` are read as UTC.
pub fn normalize_draw_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(timestamp.date());
    }
    parse_draw_date(raw)
}

pub fn is_draw_day(date: NaiveDate) -> bool {
    DRAW_DAYS.contains(&date.weekday())
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
