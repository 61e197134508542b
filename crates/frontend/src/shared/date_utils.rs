/// Utilities for date and time formatting
///
/// Date inputs work with `YYYY-MM-DD`, the backend with `YYYY-MM-DDTHH:MM:SS`,
/// the UI shows `DD/MM/YYYY`.
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Format ISO date or datetime string to DD/MM/YYYY
/// Example: "2024-03-15T14:02:26" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

pub fn format_day(dt: NaiveDateTime) -> String {
    dt.format("%d/%m/%Y").to_string()
}

/// Value for `<input type="date">`
pub fn to_date_input(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DD` from a date input -> start of that day
pub fn start_of_day(date_input: &str) -> Option<NaiveDateTime> {
    parse_date_input(date_input).map(|d| d.and_time(NaiveTime::MIN))
}

/// `YYYY-MM-DD` from a date input -> last second of that day
pub fn end_of_day(date_input: &str) -> Option<NaiveDateTime> {
    parse_date_input(date_input)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
}

fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    // inputs may already carry a time part when prefilled from an offer
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26"), "15/03/2024");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_day_bounds() {
        let start = start_of_day("2025-01-10").unwrap();
        let end = end_of_day("2025-01-10").unwrap();
        assert_eq!(
            start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2025-01-10T00:00:00"
        );
        assert_eq!(
            end.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2025-01-10T23:59:59"
        );
        assert_eq!(to_date_input(end), "2025-01-10");
    }

    #[test]
    fn test_invalid_input() {
        assert!(start_of_day("").is_none());
        assert!(end_of_day("10/01/2025").is_none());
        assert!(start_of_day("2025-01-10T23:59:59").is_some());
    }
}
