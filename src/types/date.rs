//! Publication dates. The wire form is `YYYY-MM-DD`; anything that arrives longer
//! is cut down before it goes back to the server.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

pub const WIRE_FORMAT: &str = "%Y-%m-%d";
pub const LONG_FORMAT: &str = "%B %-d, %Y";

/// Drops everything from the first time delimiter onward, provided what comes
/// before it is a wire-form date.
///
/// `"2024-05-01T00:00:00Z"` becomes `"2024-05-01"`; a plain date or free text
/// such as `"May 1, 2024"` is returned as is.
pub fn normalize_date(value: &str) -> &str {
    match value.find(['T', ' ']) {
        Some(i) if NaiveDate::parse_from_str(&value[..i], WIRE_FORMAT).is_ok() => &value[..i],
        _ => value,
    }
}

/// Parses the forms a date cell shows up in, resolved to the UTC calendar day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, WIRE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    dateparser::parse_with_timezone(value, &Utc)
        .ok()
        .map(|ts| ts.date_naive())
}

/// Same as [parse_date], for a JSON cell. Numbers are epoch milliseconds.
pub fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|ts| ts.date_naive()),
        _ => None,
    }
}

/// Reformats a longer timestamp to the wire form for display in an edit form.
/// Values that don't parse are left alone.
pub fn reformat_for_display(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format(WIRE_FORMAT).to_string(),
        None => value.to_string(),
    }
}

pub fn format_long(date: NaiveDate) -> String {
    date.format(LONG_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn normalize_cuts_at_delimiter() {
        assert_eq!(normalize_date("2024-05-01T00:00:00Z"), "2024-05-01");
        assert_eq!(normalize_date("2024-05-01 10:11:12"), "2024-05-01");
        assert_eq!(normalize_date("2024-05-01"), "2024-05-01");
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date("May 1, 2024"), "May 1, 2024");
        assert_eq!(normalize_date("Tuesday"), "Tuesday");
    }

    #[test]
    fn reformat_timestamps() {
        assert_eq!(reformat_for_display("2024-05-01T13:45:00.000Z"), "2024-05-01");
        assert_eq!(reformat_for_display("2024-05-01"), "2024-05-01");
        assert_eq!(reformat_for_display("soon"), "soon");
    }

    #[test]
    fn epoch_millis() {
        assert_eq!(
            parse_date_value(&json!(1714521600000_i64)),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(parse_date_value(&json!(true)), None);
    }
}
