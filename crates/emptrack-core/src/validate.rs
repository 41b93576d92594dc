//! Answer validation rules.
//!
//! Every interactive question carries a [`Rule`]. The prompt loop feeds each raw
//! answer through [`Rule::check`] and asks again until it passes; nothing here
//! touches the terminal or the database.
//!
//! Digit classes are ASCII-only (`[0-9]`), so an answer that passes `Numeric`
//! always parses as an identifier. Text and amount limits match the column
//! types, so an accepted answer always fits its column.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::Result;
use crate::ids::IdError;

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

static MONEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").expect("valid regex"));

/// Longest name or title, in characters, after trimming (`VARCHAR(30)`).
pub const MAX_TEXT_LEN: usize = 30;

/// Smallest amount that no longer fits a salary column (`DECIMAL(10, 2)`).
pub const SALARY_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Format rule applied to a single prompt answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Trimmed input must not be empty and at most [`MAX_TEXT_LEN`] characters.
    NonEmpty,
    /// Input must be one or more digits.
    Numeric,
    /// Input is either empty or one or more digits. Empty means "none".
    OptionalNumeric,
    /// Input is a decimal with at most two fractional digits, greater than zero
    /// and below [`SALARY_LIMIT`].
    PositiveMoney,
}

impl Rule {
    /// Check a raw answer against this rule.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` carrying the rule's default message when the
    /// answer is rejected.
    pub fn check(self, input: &str) -> std::result::Result<(), ValidationError> {
        let ok = match self {
            Self::NonEmpty => {
                let len = input.trim().chars().count();
                (1..=MAX_TEXT_LEN).contains(&len)
            }
            Self::Numeric => NUMERIC.is_match(input),
            Self::OptionalNumeric => input.is_empty() || NUMERIC.is_match(input),
            Self::PositiveMoney => positive_amount(input).is_some(),
        };

        if ok {
            Ok(())
        } else {
            Err(ValidationError::new(self, self.default_message()))
        }
    }

    /// The message shown when no field-specific message is configured.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::NonEmpty => "Invalid entry",
            Self::Numeric => "Please enter a valid ID (numeric).",
            Self::OptionalNumeric => "Please enter a valid ID (numeric) or leave it empty.",
            Self::PositiveMoney => "Please enter an amount greater than zero (e.g. 52000 or 52000.50).",
        }
    }
}

/// A rejected answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The rule that rejected the answer.
    pub rule: Rule,
    /// Human-readable explanation shown before re-prompting.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error with a custom message.
    #[must_use]
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }

    /// Replace the message with a field-specific one.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Validate and parse a required identifier.
///
/// # Errors
///
/// Returns an error if the answer is not numeric.
pub fn parse_id<T>(input: &str) -> Result<T>
where
    T: FromStr<Err = IdError>,
{
    Rule::Numeric.check(input)?;
    Ok(input.parse()?)
}

/// Validate and parse an optional identifier; the empty answer yields `None`.
///
/// # Errors
///
/// Returns an error if the answer is neither empty nor numeric.
pub fn parse_optional_id<T>(input: &str) -> Result<Option<T>>
where
    T: FromStr<Err = IdError>,
{
    Rule::OptionalNumeric.check(input)?;
    if input.is_empty() {
        return Ok(None);
    }
    Ok(Some(input.parse()?))
}

/// Validate and parse a salary amount.
///
/// # Errors
///
/// Returns an error if the answer is not a positive amount with at most two
/// decimal places.
pub fn parse_money(input: &str) -> Result<Decimal> {
    positive_amount(input).ok_or_else(|| {
        ValidationError::new(Rule::PositiveMoney, Rule::PositiveMoney.default_message()).into()
    })
}

fn positive_amount(input: &str) -> Option<Decimal> {
    if !MONEY.is_match(input) {
        return None;
    }
    Decimal::from_str(input)
        .ok()
        .filter(|amount| *amount > Decimal::ZERO && *amount < SALARY_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ManagerId, RoleId};
    use crate::CoreError;

    #[test]
    fn non_empty_trims() {
        assert!(Rule::NonEmpty.check("Ada").is_ok());
        assert!(Rule::NonEmpty.check("  Ada  ").is_ok());
        assert!(Rule::NonEmpty.check("").is_err());
        assert!(Rule::NonEmpty.check("   \t").is_err());
    }

    #[test]
    fn text_fits_column() {
        let longest = "x".repeat(MAX_TEXT_LEN);
        assert!(Rule::NonEmpty.check(&longest).is_ok());
        assert!(Rule::NonEmpty.check(&format!("  {longest}  ")).is_ok());
        assert!(Rule::NonEmpty.check(&format!("{longest}x")).is_err());
        // Characters, not bytes.
        assert!(Rule::NonEmpty.check(&"é".repeat(MAX_TEXT_LEN)).is_ok());
    }

    #[test]
    fn numeric_accepts_only_digits() {
        for good in ["0", "7", "42", "000123", "18446744073709551615"] {
            assert!(Rule::Numeric.check(good).is_ok(), "{good} should pass");
        }
        for bad in ["", " 1", "1 ", "1.0", "-1", "+1", "12a", "abc", "١٢"] {
            assert!(Rule::Numeric.check(bad).is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn optional_numeric_accepts_empty() {
        assert!(Rule::OptionalNumeric.check("").is_ok());
        assert!(Rule::OptionalNumeric.check("3").is_ok());
        assert!(Rule::OptionalNumeric.check(" ").is_err());
        assert!(Rule::OptionalNumeric.check("none").is_err());
    }

    #[test]
    fn positive_money() {
        for good in ["1", "90000", "52000.5", "52000.50", "0.01"] {
            assert!(Rule::PositiveMoney.check(good).is_ok(), "{good} should pass");
        }
        assert!(Rule::PositiveMoney.check("99999999.99").is_ok());
        for bad in [
            "", "0", "0.00", "-5", "12.345", "1,000", ".50", "12.", "abc", "100000000",
        ] {
            assert!(Rule::PositiveMoney.check(bad).is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn messages_can_be_specialised() {
        let err = Rule::Numeric
            .check("x")
            .unwrap_err()
            .with_message("Please enter a valid role ID (numeric).");
        assert_eq!(err.rule, Rule::Numeric);
        assert_eq!(err.to_string(), "Please enter a valid role ID (numeric).");
    }

    #[test]
    fn parse_helpers() {
        let role: RoleId = parse_id("12").unwrap();
        assert_eq!(role.get(), 12);
        assert!(matches!(parse_id::<RoleId>("x"), Err(CoreError::Validation(_))));

        assert_eq!(parse_optional_id::<ManagerId>("").unwrap(), None);
        assert_eq!(
            parse_optional_id::<ManagerId>("4").unwrap(),
            Some(ManagerId::new(4))
        );

        assert_eq!(parse_money("90000").unwrap(), Decimal::new(90000, 0));
        assert_eq!(parse_money("10.25").unwrap(), Decimal::new(1025, 2));
        assert!(parse_money("0").is_err());
    }
}
