//! String-to-typed-value conversion helpers.
//!
//! Everything the binder writes into a target field passes through this
//! module: percent-decoding of raw parameter values, the boolean-literal
//! parser, and the ordered timestamp-format ladder for time-valued fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::trace;

/// Percent-decode a raw query or form component.
///
/// `+` is treated as a space (form encoding) before percent sequences are
/// decoded. The result must be well-formed UTF-8.
///
/// # Arguments
///
/// * `raw` - The undecoded component as it appeared on the wire
///
/// # Returns
///
/// The decoded string, or the UTF-8 failure when the decoded bytes are not a
/// valid string.
pub fn decode_component(raw: &str) -> Result<String, std::string::FromUtf8Error> {
    let unplused = raw.replace('+', " ");
    let decoded = urlencoding::decode(&unplused)?;
    Ok(decoded.into_owned())
}

/// Parse a boolean literal.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` as true and `0`, `f`, `F`,
/// `FALSE`, `false`, `False` as false. Anything else is `None`.
pub fn parse_bool_literal(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

type TimeParser = fn(&str) -> Option<DateTime<Utc>>;

/// Ordered timestamp-format ladder for time-valued fields.
///
/// The first entry that parses wins. The RFC 2822 parser covers the RFC 1123
/// and RFC 822 shapes with both named and numeric zones; the RFC 3339 parser
/// covers the nanosecond variant. The naive entries are interpreted as UTC.
const TIME_PARSERS: &[(&str, TimeParser)] = &[
    ("rfc2822", parse_rfc2822),
    ("rfc3339", parse_rfc3339),
    ("rfc850", parse_rfc850),
    ("unix-date", parse_unix_date),
    ("date-only", parse_date_only),
];

/// Parse a timestamp against the accepted formats, in order.
///
/// Returns `None` when every format is exhausted; the binder turns that into
/// an error naming the field.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    for (name, parser) in TIME_PARSERS {
        if let Some(parsed) = parser(value) {
            trace!(format = name, "timestamp parsed");
            return Some(parsed);
        }
    }
    None
}

fn parse_rfc2822(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_rfc850(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%A, %d-%b-%y %H:%M:%S GMT")
        .ok()
        .map(|dt| dt.and_utc())
}

fn parse_unix_date(value: &str) -> Option<DateTime<Utc>> {
    const ZONELESS: &str = "%a %b %e %H:%M:%S %Y";
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, ZONELESS) {
        return Some(parsed.and_utc());
    }
    // `date` output carries a zone abbreviation chrono cannot parse. Drop an
    // alphabetic fifth token and read the rest at offset zero, the way an
    // unrecognized abbreviation binds.
    let tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.len() == 6
        && !tokens[4].is_empty()
        && tokens[4].chars().all(|c| c.is_ascii_alphabetic())
    {
        let stripped = format!(
            "{} {} {} {} {}",
            tokens[0], tokens[1], tokens[2], tokens[3], tokens[5]
        );
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&stripped, ZONELESS) {
            return Some(parsed.and_utc());
        }
    }
    None
}

fn parse_date_only(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
