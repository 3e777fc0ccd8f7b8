use chrono::{DateTime, Datelike, Local, TimeZone};

/// Year shown in the footer's copyright line.
pub fn copyright_year() -> i32 {
    year_at(&Local::now())
}

pub fn year_at<Tz: TimeZone>(now: &DateTime<Tz>) -> i32 {
    now.year()
}
