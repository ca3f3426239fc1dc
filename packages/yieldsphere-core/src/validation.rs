//! Input validation for strategies, investments and transactions.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Investor risk appetite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Conservative,
    Moderate,
    Aggressive,
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "conservative" => Ok(RiskLevel::Conservative),
            "moderate" => Ok(RiskLevel::Moderate),
            "aggressive" => Ok(RiskLevel::Aggressive),
            other => Err(Error::Validation(format!("Unknown risk level: {}", other))),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Conservative => write!(f, "Conservative"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::Aggressive => write!(f, "Aggressive"),
        }
    }
}

/// Transaction direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSide {
    Buy,
    Sell,
}

/// Strategy names are 3 to 50 characters.
pub fn is_valid_strategy_name(name: &str) -> bool {
    (3..=50).contains(&name.chars().count())
}

/// Strategy descriptions are at most 200 characters.
pub fn is_valid_strategy_description(description: &str) -> bool {
    description.chars().count() <= 200
}

/// Investments must be strictly positive.
pub fn is_valid_investment_amount(amount: f64) -> bool {
    amount > 0.0
}

/// Check an amount against optional inclusive bounds. `NaN` is never valid.
pub fn is_valid_amount(amount: f64, min: Option<f64>, max: Option<f64>) -> bool {
    if amount.is_nan() {
        return false;
    }
    if min.is_some_and(|min| amount < min) {
        return false;
    }
    if max.is_some_and(|max| amount > max) {
        return false;
    }
    true
}

/// Check that a transaction is affordable.
///
/// For a buy, `balance` is cash and `amount * price` must fit in it. For a
/// sell, `balance` is units held and `amount` must not exceed it.
pub fn validate_transaction(
    side: TransactionSide,
    amount: f64,
    balance: f64,
    price: f64,
) -> Result<()> {
    if !is_valid_amount(amount, Some(0.0), None) {
        return Err(Error::Validation("Invalid amount".to_string()));
    }

    match side {
        TransactionSide::Buy if amount * price > balance => {
            Err(Error::Validation("Insufficient balance".to_string()))
        }
        TransactionSide::Sell if amount > balance => {
            Err(Error::Validation("Insufficient assets".to_string()))
        }
        _ => Ok(()),
    }
}

/// Simple `local@domain.tld` shape check. The top-level domain needs at
/// least two letters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
        && !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Outcome of a password strength check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCheck {
    pub is_valid: bool,
    /// One message per failed rule, in rule order
    pub errors: Vec<String>,
}

/// Check length, upper and lower case, digit and special-character rules.
pub fn validate_password(password: &str) -> PasswordCheck {
    let mut errors = Vec::new();

    if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.push(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN_LENGTH
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        errors.push("Password must contain at least one special character".to_string());
    }

    PasswordCheck {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// E.164 shape: optional `+`, a non-zero digit, then 1 to 14 more digits.
pub fn is_valid_phone_number(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let mut chars = digits.chars();
    matches!(chars.next(), Some('1'..='9'))
        && (1..=14).contains(&chars.clone().count())
        && chars.all(|c| c.is_ascii_digit())
}

/// Absolute URL with a scheme.
pub fn is_valid_url(raw: &str) -> bool {
    url::Url::parse(raw).is_ok()
}

/// Parse an RFC 3339 or RFC 2822 timestamp, or a plain `YYYY-MM-DD[ HH:MM:SS]`
/// date taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn is_valid_date(raw: &str) -> bool {
    parse_timestamp(raw).is_some()
}

/// `0x` followed by exactly 40 hex digits.
pub fn is_valid_ethereum_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Reject performance summaries with a negative Sharpe ratio or a drawdown
/// beyond 100%.
pub fn is_plausible_performance(sharpe_ratio: f64, max_drawdown: f64) -> bool {
    sharpe_ratio >= 0.0 && max_drawdown <= 100.0
}

/// Check that a backtest window is non-empty. Dates are `YYYY-MM-DD`.
pub fn validate_backtest_window(start: &str, end: &str) -> Result<()> {
    let parse = |raw: &str| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| Error::Validation(format!("Invalid date {}: {}", raw, e)))
    };

    if parse(start)? < parse(end)? {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "Backtest start {} must be before end {}",
            start, end
        )))
    }
}
