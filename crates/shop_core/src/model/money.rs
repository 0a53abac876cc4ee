//! Integer money type.
//!
//! # Responsibility
//! - Represent prices and totals in cents, never as floating point.
//! - Parse operator input (`12.50`, `12.5`, `12`) and render with two
//!   fractional digits, in tables and in JSON alike.
//!
//! # Invariants
//! - Arithmetic used for totals is checked; overflow is an error, never a
//!   silent wrap.

use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static MONEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-)?(\d+)(?:\.(\d{1,2}))?$").expect("valid money regex"));

const CENTS_PER_UNIT: i64 = 100;

/// Monetary amount in the smallest currency unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns `self * quantity`, or `None` on overflow.
    pub fn checked_mul(self, quantity: i64) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let unit = CENTS_PER_UNIT.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / unit, abs % unit)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::MalformedPrice(raw.to_string());
        let captures = MONEY_RE.captures(raw.trim()).ok_or_else(malformed)?;

        let major: i64 = captures[2].parse().map_err(|_| malformed())?;
        let minor = match captures.get(3) {
            Some(fraction) if fraction.as_str().len() == 1 => {
                fraction.as_str().parse::<i64>().map_err(|_| malformed())? * 10
            }
            Some(fraction) => fraction.as_str().parse::<i64>().map_err(|_| malformed())?,
            None => 0,
        };

        let cents = major
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|value| value.checked_add(minor))
            .ok_or_else(malformed)?;

        if captures.get(1).is_some() {
            Ok(Money(-cents))
        } else {
            Ok(Money(cents))
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Money)
    }
}

#[cfg(test)]
mod tests {
    use super::Money;
    use crate::model::validation::ValidationError;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!("12.50".parse::<Money>().unwrap(), Money::from_cents(1250));
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_cents(1250));
        assert_eq!("8".parse::<Money>().unwrap(), Money::from_cents(800));
        assert_eq!(" 0.07 ".parse::<Money>().unwrap(), Money::from_cents(7));
    }

    #[test]
    fn negative_amounts_parse_so_validation_can_reject_them() {
        let parsed = "-1.25".parse::<Money>().unwrap();
        assert!(parsed.is_negative());
        assert_eq!(parsed.cents(), -125);
    }

    #[test]
    fn rejects_malformed_amounts() {
        for raw in ["", "abc", "1.234", "1.", ".5", "1,50", "12.5x", "99999999999999999999"] {
            let err = raw.parse::<Money>().unwrap_err();
            assert_eq!(err, ValidationError::MalformedPrice(raw.to_string()));
        }
    }

    #[test]
    fn display_always_has_two_fraction_digits() {
        assert_eq!(Money::from_cents(3300).to_string(), "33.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-125).to_string(), "-1.25");
    }

    #[test]
    fn serializes_as_decimal_text() {
        let value = serde_json::to_value(Money::from_cents(1250)).unwrap();
        assert_eq!(value, serde_json::json!("12.50"));

        let parsed: Money = serde_json::from_value(serde_json::json!("8.5")).unwrap();
        assert_eq!(parsed, Money::from_cents(850));
        assert!(serde_json::from_value::<Money>(serde_json::json!("cheap")).is_err());
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        assert_eq!(
            Money::from_cents(1250).checked_mul(2),
            Some(Money::from_cents(2500))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }
}
