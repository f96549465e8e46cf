use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};

/// UTC calendar day of a date or timestamp string as the list service
/// returns them (`2024-03-05`, `2024-03-05T10:00:00Z`, ...).
pub fn calendar_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(timestamp.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// `[start, end)` of a day as OData `datetime'...'` literals.
pub fn day_bounds(day: NaiveDate) -> Option<(String, String)> {
    let next = day.checked_add_days(Days::new(1))?;
    Some((midnight_literal(day), midnight_literal(next)))
}

fn midnight_literal(day: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", day.format("%Y-%m-%d"))
}
