//! Value parsers for the typed key classes.
//!
//! Every parser takes one raw sub-value and either returns a `TypedValue`
//! or a `ParseFailure` holding the most-cleaned form of the input. None of
//! them log; the dispatcher has the key and element context for that.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::{
    METERS_PER_FOOT, METERS_PER_INCH, OUTPUT_TIMESTAMP_FORMAT, SOURCE_TIMESTAMP_FORMAT,
};
use super::keys::KeyClass;
use crate::error::ParseFailure;
use crate::types::TypedValue;

type ParseResult = std::result::Result<TypedValue, ParseFailure>;

/// Parse a float, rejecting `inf` and `nan` which JSON cannot carry.
fn parse_finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Parse a count such as `3`, `1,234` or `2.5`.
///
/// # Examples
/// ```
/// use osmdocs_shaper::tags::parse_count;
/// use osmdocs_shaper::types::TypedValue;
///
/// assert_eq!(parse_count("1,234"), Ok(TypedValue::Integer(1234)));
/// assert_eq!(parse_count(" 2.5 "), Ok(TypedValue::Float(2.5)));
/// assert!(parse_count("yes").is_err());
/// ```
pub fn parse_count(raw: &str) -> ParseResult {
    let cleaned = raw.trim().replace(',', "");
    if let Ok(int) = cleaned.parse::<i64>() {
        return Ok(TypedValue::Integer(int));
    }
    match parse_finite(&cleaned) {
        Some(float) => Ok(TypedValue::Float(float)),
        None => Err(ParseFailure::new(KeyClass::Count, raw, cleaned)),
    }
}

/// Parse a length into meters.
///
/// Imperial markers are checked first, in order: `"`, `ft`, `feet`, `'`.
/// `F'I"` and `F'` are feet and inches; any other imperial value is a bare
/// number of feet. Without a marker the value is metric, with an optional
/// `cm`, `km` or `m` suffix and an optional decimal comma.
///
/// # Examples
/// ```
/// use osmdocs_shaper::tags::parse_length;
/// use osmdocs_shaper::types::TypedValue;
///
/// assert_eq!(parse_length("10m"), Ok(TypedValue::Float(10.0)));
/// assert_eq!(parse_length("2km"), Ok(TypedValue::Float(2000.0)));
/// ```
pub fn parse_length(raw: &str) -> ParseResult {
    let trimmed = raw.trim();

    let imperial = if trimmed.contains('"') {
        Some(trimmed.replace('"', ""))
    } else if trimmed.contains("ft") {
        Some(trimmed.replace("ft", ""))
    } else if trimmed.contains("feet") {
        Some(trimmed.replace("feet", ""))
    } else if trimmed.contains('\'') {
        Some(trimmed.to_string())
    } else {
        None
    };

    match imperial {
        Some(value) => parse_imperial_length(raw, value.trim()),
        None => parse_metric_length(raw, trimmed),
    }
}

fn parse_imperial_length(raw: &str, value: &str) -> ParseResult {
    let Some((feet, inches)) = value.split_once('\'') else {
        return match parse_finite(value) {
            Some(feet) => Ok(TypedValue::Float(feet * METERS_PER_FOOT)),
            None => Err(ParseFailure::new(KeyClass::Length, raw, value)),
        };
    };

    let inches = match inches.trim() {
        "" => "0",
        other => other,
    };
    match (feet.trim().parse::<i64>(), inches.parse::<i64>()) {
        (Ok(feet), Ok(inches)) => Ok(TypedValue::Float(
            feet as f64 * METERS_PER_FOOT + inches as f64 * METERS_PER_INCH,
        )),
        _ => Err(ParseFailure::new(KeyClass::Length, raw, value)),
    }
}

#[derive(Clone, Copy)]
enum MetricUnit {
    Centimeter,
    Meter,
    Kilometer,
}

impl MetricUnit {
    fn to_meters(self, value: f64) -> f64 {
        match self {
            Self::Centimeter => value / 100.0,
            Self::Meter => value,
            Self::Kilometer => value * 1000.0,
        }
    }
}

fn parse_metric_length(raw: &str, trimmed: &str) -> ParseResult {
    let value = trimmed.replace(',', ".");

    let (number, unit) = if let Some(v) = value.strip_suffix("cm") {
        (v, MetricUnit::Centimeter)
    } else if let Some(v) = value.strip_suffix("km") {
        (v, MetricUnit::Kilometer)
    } else if let Some(v) = value.strip_suffix('m') {
        (v, MetricUnit::Meter)
    } else {
        (value.as_str(), MetricUnit::Meter)
    };

    match parse_finite(number) {
        Some(n) => Ok(TypedValue::Float(unit.to_meters(n))),
        None => Err(ParseFailure::new(KeyClass::Length, raw, number.trim())),
    }
}

/// Parse a weight in tons, with or without a trailing `T`.
pub fn parse_weight(raw: &str) -> ParseResult {
    let trimmed = raw.trim();
    let value = trimmed.strip_suffix('T').unwrap_or(trimmed).trim();
    parse_finite(value)
        .map(TypedValue::Float)
        .ok_or_else(|| ParseFailure::new(KeyClass::Weight, raw, value))
}

/// Parse a speed in mph, with or without a trailing `mph`.
pub fn parse_speed(raw: &str) -> ParseResult {
    let trimmed = raw.trim();
    let value = trimmed.strip_suffix("mph").unwrap_or(trimmed).trim();
    parse_finite(value)
        .map(TypedValue::Float)
        .ok_or_else(|| ParseFailure::new(KeyClass::Speed, raw, value))
}

/// Parse a date into an ISO-8601 timestamp at midnight.
///
/// The grammar is chosen by the length of the trimmed value:
///
/// | length | accepted forms |
/// |--------|----------------|
/// | 4      | `YYYY` |
/// | 7      | `YYYY-MM`, `MM-YYYY` |
/// | 10     | `YYYY-MM-DD`, `DD-MM-YYYY`, `DD/MM/YYYY` |
/// | other  | `DD Month YYYY`, `Month YYYY` |
///
/// # Examples
/// ```
/// use osmdocs_shaper::tags::parse_date;
/// use osmdocs_shaper::types::TypedValue;
///
/// assert_eq!(
///     parse_date("17-05-2020"),
///     Ok(TypedValue::Timestamp("2020-05-17T00:00:00".to_string()))
/// );
/// ```
pub fn parse_date(raw: &str) -> ParseResult {
    let value = raw.trim();
    let date = match value.chars().count() {
        4 => parse_year(value),
        7 => parse_year_month(value),
        10 => parse_full_date(value),
        _ => parse_month_name(value),
    };

    date.map(|d| TypedValue::Timestamp(format_midnight(d)))
        .ok_or_else(|| ParseFailure::new(KeyClass::Date, raw, value))
}

fn parse_year(value: &str) -> Option<NaiveDate> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(value.parse().ok()?, 1, 1)
}

fn parse_year_month(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split('-').collect();
    if parts.len() != 2 {
        return None;
    }
    if parts[0].len() == 4 {
        NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok()
    } else if parts[1].len() == 4 {
        NaiveDate::parse_from_str(&format!("01-{value}"), "%d-%m-%Y").ok()
    } else {
        None
    }
}

fn parse_full_date(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split('-').collect();
    if parts.len() != 3 {
        return NaiveDate::parse_from_str(value, "%d/%m/%Y").ok();
    }
    if parts[0].len() == 4 {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
    } else if parts[2].len() == 4 {
        NaiveDate::parse_from_str(value, "%d-%m-%Y").ok()
    } else {
        None
    }
}

/// `DD Month YYYY` or `Month YYYY`, with the month spelled out in full.
fn parse_month_name(value: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let (month, date) = match tokens.as_slice() {
        [_, month, _] => (*month, NaiveDate::parse_from_str(value, "%d %B %Y").ok()?),
        [month, _] => (
            *month,
            NaiveDate::parse_from_str(&format!("1 {value}"), "%d %B %Y").ok()?,
        ),
        _ => return None,
    };

    // chrono's %B also accepts abbreviations
    let full_name = date.format("%B").to_string();
    full_name.eq_ignore_ascii_case(month).then_some(date)
}

fn format_midnight(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .format(OUTPUT_TIMESTAMP_FORMAT)
        .to_string()
}

/// Coerce `yes`/`no` (any case) to a boolean.
#[must_use]
pub fn parse_flag(raw: &str) -> Option<bool> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if value.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// Convert an OSM edit timestamp (`2008-02-09T11:34:42Z`) to ISO-8601.
///
/// Returns `None` if the value is not in the export format.
#[must_use]
pub fn parse_edit_timestamp(raw: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(raw.trim(), SOURCE_TIMESTAMP_FORMAT)
        .ok()
        .map(|ts| ts.format(OUTPUT_TIMESTAMP_FORMAT).to_string())
}
