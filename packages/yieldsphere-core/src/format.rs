//! Display formatting for dashboard figures.

use std::fmt::Write;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// `Apr 29, 2024, 3:07:09 PM`
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%b %-d, %Y, %-I:%M:%S %p";

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// Insert thousands separators into the integer part of a plain decimal string.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}

fn trim_fraction_zeros(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/// US dollar amount with two decimals and thousands separators, e.g. `-$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{}$∞", sign);
    }
    format!("{}${}", sign, group_thousands(&format!("{:.2}", amount.abs())))
}

/// A value already expressed in percent, e.g. `12.3456` becomes `12.35%`.
pub fn format_percentage(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return format!("{}%", value);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!(
        "{}{}%",
        sign,
        group_thousands(&format!("{:.*}", fraction_digits, value.abs()))
    )
}

/// Abbreviate large numbers with K/M/B/T suffixes, trimming trailing zeros.
pub fn format_compact(value: f64, max_fraction_digits: usize) -> String {
    const LOOKUP: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    match LOOKUP.iter().find(|(threshold, _)| value.abs() >= *threshold) {
        Some((threshold, symbol)) => format!(
            "{}{}",
            trim_fraction_zeros(format!("{:.*}", max_fraction_digits, value / threshold)),
            symbol
        ),
        None => trim_fraction_zeros(format!("{:.*}", max_fraction_digits, value)),
    }
}

/// Format a timestamp with a `strftime` pattern.
///
/// Fails with `InvalidInput` when the pattern has an unknown specifier.
pub fn format_date_time(date: &DateTime<Utc>, pattern: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern))
        .map_err(|_| Error::InvalidInput(format!("invalid date format: {}", pattern)))?;
    Ok(out)
}

/// Whole calendar months from `earlier` to `later`, not counting a partial
/// last month.
fn calendar_months(earlier: &DateTime<Utc>, later: &DateTime<Utc>) -> i64 {
    let mut months = i64::from(later.year() - earlier.year()) * 12 + i64::from(later.month())
        - i64::from(earlier.month());
    if months > 0
        && (later.day(), later.num_seconds_from_midnight())
            < (earlier.day(), earlier.num_seconds_from_midnight())
    {
        months -= 1;
    }
    months
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Human distance between `date` and `base`, e.g. `3 days ago` or
/// `in about 2 hours`.
pub fn format_distance(date: &DateTime<Utc>, base: &DateTime<Utc>) -> String {
    let (earlier, later) = if date <= base { (date, base) } else { (base, date) };
    let seconds = (*later - *earlier).num_seconds();
    let minutes = (seconds as f64 / 60.0).round() as i64;

    let distance = if minutes < 1 {
        "less than a minute".to_string()
    } else if minutes < 45 {
        plural(minutes, "minute")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        format!("about {}", plural((minutes as f64 / 60.0).round() as i64, "hour"))
    } else if minutes < 2520 {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        plural((minutes as f64 / MINUTES_IN_DAY as f64).round() as i64, "day")
    } else if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
        format!("about {}", plural(months, "month"))
    } else {
        let months = calendar_months(earlier, later);
        if months < 12 {
            plural((minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64, "month")
        } else {
            let years = months / 12;
            match months % 12 {
                0..=2 => format!("about {}", plural(years, "year")),
                3..=8 => format!("over {}", plural(years, "year")),
                _ => format!("almost {}", plural(years + 1, "year")),
            }
        }
    };

    if date <= base {
        format!("{} ago", distance)
    } else {
        format!("in {}", distance)
    }
}

/// Distance from now, see [`format_distance`].
pub fn format_relative_time(date: &DateTime<Utc>) -> String {
    format_distance(date, &Utc::now())
}

pub fn format_asset_symbol(symbol: &str) -> String {
    symbol.to_uppercase()
}

/// Lifecycle of an on-chain transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// Badge text and theme color for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusLabel {
    pub text: &'static str,
    pub color: &'static str,
}

pub fn format_transaction_status(status: TransactionStatus) -> StatusLabel {
    let (text, color) = match status {
        TransactionStatus::Pending => ("Pending", "warning"),
        TransactionStatus::Completed => ("Completed", "success"),
        TransactionStatus::Failed => ("Failed", "error"),
    };
    StatusLabel { text, color }
}

/// Ten-digit numbers become `(555) 123-4567`; anything else is returned as is.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 10 {
        return phone.to_string();
    }
    format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

/// Shorten a wallet address to its first and last `chars` characters.
///
/// Addresses too short to shorten are returned unchanged.
pub fn format_address(address: &str, chars: usize) -> String {
    let count = address.chars().count();
    if count <= chars * 2 {
        return address.to_string();
    }
    let head: String = address.chars().take(chars).collect();
    let tail: String = address.chars().skip(count - chars).collect();
    format!("{}...{}", head, tail)
}

/// Coarse human duration: `2d 3h`, `4h 5m`, `6m 7s` or `8s`.
pub fn format_duration(milliseconds: u64) -> String {
    let seconds = milliseconds / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

/// Byte count in base-1024 units with two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const SIZES: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut index = 0;
    let mut size = bytes as f64;
    while size >= 1024.0 && index < SIZES.len() - 1 {
        size /= 1024.0;
        index += 1;
    }
    format!("{:.2} {}", size, SIZES[index])
}
