//! Formatting utilities shared by the renderer and the chart tooltip

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::config::DisplayZone;
use crate::types::TradeTime;

/// Date/time layout matching the browser's en-US `toLocaleString()`
const DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Shown when a timestamp cannot be interpreted
pub const INVALID_DATE: &str = "Invalid Date";

/// Digits kept past the cut so ties are judged on the exact binary value
const GUARD_DIGITS: usize = 30;

/// `value` with exactly `decimals` fraction digits, like `Number.prototype.toFixed`
///
/// Ties round away from zero and negative zero has no sign. NaN renders as "NaN".
pub fn fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let (whole, frac) = round_half_up(value.abs(), decimals);
    let sign = if value < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{frac}")
    }
}

/// US-dollar currency text with thousands separators, e.g. `-$1,234.50`
pub fn usd(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "$NaN".to_string()
        } else if value > 0.0 {
            "$∞".to_string()
        } else {
            "-$∞".to_string()
        };
    }

    let (whole, cents) = round_half_up(value.abs(), 2);

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_zero = whole.bytes().chain(cents.bytes()).all(|d| d == b'0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Whole and fraction digits of a non-negative `magnitude`, rounded half away from zero
fn round_half_up(magnitude: f64, decimals: usize) -> (String, String) {
    let exact = format!("{:.*}", decimals + GUARD_DIGITS, magnitude);
    let (whole, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = whole.bytes().chain(frac.bytes().take(decimals)).collect();
    if frac.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let text: String = digits.into_iter().map(char::from).collect();
    let (whole, frac) = text.split_at(text.len() - decimals);
    (whole.to_string(), frac.to_string())
}

/// Remove the first occurrence of a quote suffix from a pair symbol (`BTCUSDT` -> `BTC`)
pub fn display_symbol(symbol: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        symbol.to_string()
    } else {
        symbol.replacen(suffix, "", 1)
    }
}

/// Unix seconds as a date/time string in the display zone
pub fn unix_seconds(secs: f64, zone: DisplayZone) -> String {
    millis_to_utc(secs * 1000.0).map_or_else(|| INVALID_DATE.to_string(), |t| in_zone(&t, zone))
}

/// Trade timestamp as a date/time string in the display zone
///
/// Naive ISO date-times (no offset) are read as wall-clock time in the display
/// zone; bare dates are UTC midnight.
pub fn trade_time(time: Option<&TradeTime>, zone: DisplayZone) -> String {
    let parsed = match time {
        Some(TradeTime::Millis(ms)) => millis_to_utc(*ms),
        Some(TradeTime::Text(text)) => parse_text_time(text.trim(), zone),
        None => None,
    };
    parsed.map_or_else(|| INVALID_DATE.to_string(), |t| in_zone(&t, zone))
}

fn millis_to_utc(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

fn parse_text_time(text: &str, zone: DisplayZone) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(&Utc));
    }

    // Date-only ISO text is UTC midnight, as `new Date("2024-05-01")` reads it
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|t| Utc.from_utc_datetime(&t));
    }

    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;

    match zone {
        DisplayZone::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|t| t.with_timezone(&Utc)),
        DisplayZone::Utc => Some(Utc.from_utc_datetime(&naive)),
    }
}

fn in_zone(time: &DateTime<Utc>, zone: DisplayZone) -> String {
    match zone {
        DisplayZone::Local => time.with_timezone(&Local).format(DATETIME_FORMAT).to_string(),
        DisplayZone::Utc => time.format(DATETIME_FORMAT).to_string(),
    }
}
