use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// The summary path parameter is a bare calendar date.
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw, &format_description!("[year]-[month]-[day]")).ok()
}

pub fn format_date(date: Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .expect("calendar date always formats")
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}
