//! Value transforms for the `Account` and `LC amnt` columns.
//!
//! Both transforms are pure: they take the trimmed field text and return the
//! replacement text. Only the account transform can fail; amounts are
//! rewritten literally and [`check_amount`] reports results that are not
//! numbers. Row context and logging are added by the cleaner.

use crate::error::FieldError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Accounts longer than this many characters are shortened.
pub const ACCOUNT_MAX_LEN: usize = 11;

/// Significant digits of the general numeric format.
const GENERAL_PRECISION: usize = 6;

/// Formats an account identifier.
///
/// Values of at most [`ACCOUNT_MAX_LEN`] characters are returned unchanged.
/// Longer values must be integers and are rendered in general numeric
/// notation with `,` as the decimal mark, e.g. `123456789012` becomes
/// `1,23457E+11`.
pub fn format_account(value: &str) -> Result<String, FieldError> {
    if value.chars().count() <= ACCOUNT_MAX_LEN {
        return Ok(value.to_string());
    }

    let number = parse_integer(value)?;
    let formatted =
        general_format(number).ok_or_else(|| FieldError::OutOfRange(value.to_string()))?;
    Ok(formatted.replace('.', ","))
}

/// Formats a local-currency amount.
///
/// Removes thousands separators and moves a trailing minus to the front:
/// `1,234.56-` becomes `-1234.56`. When a `-` occurs anywhere in the value,
/// the last character is dropped and `-` is prepended, whatever that last
/// character is, so `12-34` becomes `-12-3`. Use [`check_amount`] to detect
/// such results.
pub fn format_lc_amount(value: &str) -> String {
    let stripped = value.replace(',', "");
    if !stripped.contains('-') {
        return stripped;
    }

    let mut chars = stripped.chars();
    chars.next_back();
    format!("-{}", chars.as_str())
}

/// Checks that a formatted amount is empty or a decimal number.
pub fn check_amount(raw: &str, formatted: &str) -> Result<(), FieldError> {
    if formatted.is_empty() || Decimal::from_str(formatted).is_ok() {
        Ok(())
    } else {
        Err(FieldError::InvalidAmount {
            raw: raw.to_string(),
            formatted: formatted.to_string(),
        })
    }
}

/// Parses an optionally signed run of ASCII digits into the nearest `f64`.
fn parse_integer(value: &str) -> Result<f64, FieldError> {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::NotAnInteger(value.to_string()));
    }

    let number: f64 = value
        .parse()
        .map_err(|_| FieldError::NotAnInteger(value.to_string()))?;
    if !number.is_finite() {
        return Err(FieldError::OutOfRange(value.to_string()));
    }
    Ok(number)
}

/// Renders `value` like printf's `%G` with the default precision.
///
/// Exponents below -4 or at/above the precision use `d.dddddE±XX`,
/// everything else fixed notation; trailing fractional zeros are removed.
/// Returns `None` for values without a finite exponent.
fn general_format(value: f64) -> Option<String> {
    if value == 0.0 {
        return Some("0".to_string());
    }

    let scientific = format!("{:.*e}", GENERAL_PRECISION - 1, value);
    let (mantissa, exponent) = scientific.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;

    let formatted = if exponent < -4 || exponent >= GENERAL_PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}E{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (GENERAL_PRECISION as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    };
    Some(formatted)
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
