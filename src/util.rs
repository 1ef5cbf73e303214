use tz::DateTime;

/// Long-form absolute date, for title attributes and the page header.
pub fn format_datetime(dt: DateTime) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02} {}",
        dt.year(),
        dt.month(),
        dt.month_day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        dt.local_time_type().time_zone_designation(),
    )
}
