//! Discord snowflake identifiers.
//!
//! A snowflake is accepted whenever it coerces to a number under the same
//! rules the platform's JavaScript clients use (`Number(value)` is not `NaN`).
//! The raw text is kept verbatim because it is forwarded to the upstream API
//! exactly as received.
//!
//! The creation instant lives in the high bits: `(value >> 22) + EPOCH`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

/// Discord epoch (2015-01-01T00:00:00Z) in milliseconds since the Unix epoch.
pub const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

const TIMESTAMP_SHIFT: u32 = 22;
const TIMESTAMP_DIVISOR: f64 = 4_194_304.0;
// Largest magnitude an ECMAScript time value may take.
const MAX_TIME_VALUE_MS: f64 = 8.64e15;

/// Errors raised while validating or decoding snowflakes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnowflakeError {
    /// The value does not coerce to a number.
    #[error("value is not a valid Discord snowflake: {value:?}")]
    Invalid {
        /// Rejected input.
        value: String,
    },
    /// The embedded timestamp falls outside the representable date range.
    #[error("snowflake {value:?} encodes a timestamp outside the supported range")]
    TimestampOutOfRange {
        /// Snowflake whose timestamp overflowed.
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    /// Plain unsigned integer literal that fits in 64 bits.
    Exact(u64),
    /// Any other accepted literal, evaluated as an IEEE double.
    Approximate(f64),
}

/// Validated snowflake identifier.
///
/// ## Invariants
/// - the raw text is non-empty and coerces to a non-`NaN` number.
///
/// # Examples
/// ```
/// use lookup_gateway::domain::Snowflake;
///
/// let id = Snowflake::parse("175928847299117063").expect("valid snowflake");
/// assert_eq!(id.as_str(), "175928847299117063");
/// assert_eq!(
///     id.to_iso8601().expect("in range"),
///     "2016-04-30T11:18:25.796Z"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Snowflake {
    raw: String,
    value: Numeric,
}

impl Snowflake {
    /// Validate `raw` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`SnowflakeError::Invalid`] when `raw` is empty or does not
    /// coerce to a number.
    pub fn parse(raw: impl Into<String>) -> Result<Self, SnowflakeError> {
        let raw = raw.into();
        match coerce(&raw) {
            Some(value) => Ok(Self { raw, value }),
            None => Err(SnowflakeError::Invalid { value: raw }),
        }
    }

    /// Return whether `raw` would be accepted by [`Snowflake::parse`].
    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        coerce(raw).is_some()
    }

    /// Raw identifier text as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    /// Creation instant encoded in the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SnowflakeError::TimestampOutOfRange`] when the identifier
    /// encodes an instant that cannot be represented (for example `1e300`).
    pub fn timestamp(&self) -> Result<DateTime<Utc>, SnowflakeError> {
        let millis = match self.value {
            Numeric::Exact(value) => i64::try_from(value >> TIMESTAMP_SHIFT)
                .ok()
                .and_then(|shifted| shifted.checked_add(DISCORD_EPOCH_MS)),
            Numeric::Approximate(value) => {
                let millis = (value / TIMESTAMP_DIVISOR + DISCORD_EPOCH_MS as f64).trunc();
                (millis.is_finite() && millis.abs() <= MAX_TIME_VALUE_MS).then_some(millis as i64)
            }
        };

        millis
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| SnowflakeError::TimestampOutOfRange {
                value: self.raw.clone(),
            })
    }

    /// Creation instant formatted as ISO-8601 UTC with millisecond precision.
    ///
    /// # Errors
    ///
    /// See [`Snowflake::timestamp`].
    pub fn to_iso8601(&self) -> Result<String, SnowflakeError> {
        self.timestamp()
            .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Convert raw snowflake text straight to its ISO-8601 creation instant.
///
/// # Errors
///
/// Fails when `raw` is not a valid snowflake or its timestamp is out of range.
pub fn to_timestamp(raw: &str) -> Result<String, SnowflakeError> {
    Snowflake::parse(raw)?.to_iso8601()
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for Snowflake {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Snowflake {
    type Err = SnowflakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Coerce `raw` the way `Number(raw)` does, returning `None` for `NaN`.
///
/// Used for flag masks and other numeric fields that upstream sometimes
/// serialises as strings.
pub(crate) fn coerce_number(raw: &str) -> Option<f64> {
    coerce_literal(raw.trim_matches(is_js_whitespace)).map(|numeric| match numeric {
        Numeric::Exact(value) => value as f64,
        Numeric::Approximate(value) => value,
    })
}

fn coerce(raw: &str) -> Option<Numeric> {
    if raw.is_empty() {
        return None;
    }
    coerce_literal(raw.trim_matches(is_js_whitespace))
}

fn coerce_literal(literal: &str) -> Option<Numeric> {
    if literal.is_empty() {
        return Some(Numeric::Exact(0));
    }
    if let Some(numeric) = radix_literal(literal) {
        return numeric;
    }

    let (negative, unsigned) = match literal.as_bytes().first() {
        Some(b'+') => (false, &literal[1..]),
        Some(b'-') => (true, &literal[1..]),
        _ => (false, literal),
    };
    let sign = if negative { -1.0 } else { 1.0 };

    if unsigned == "Infinity" {
        return Some(Numeric::Approximate(sign * f64::INFINITY));
    }
    if !is_decimal_literal(unsigned) {
        return None;
    }

    let all_digits = unsigned.bytes().all(|byte| byte.is_ascii_digit());
    if all_digits && literal == unsigned {
        if let Ok(value) = unsigned.parse::<u64>() {
            return Some(Numeric::Exact(value));
        }
    }
    unsigned
        .parse::<f64>()
        .ok()
        .map(|value| Numeric::Approximate(sign * value))
}

/// `0x`, `0o` and `0b` literals. Signs are not permitted with a radix prefix.
///
/// Returns `None` when `literal` has no radix prefix, `Some(None)` when the
/// prefix is present but the digits are malformed.
fn radix_literal(literal: &str) -> Option<Option<Numeric>> {
    let bytes = literal.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &literal[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(None);
    }

    let numeric = u64::from_str_radix(digits, radix)
        .map(Numeric::Exact)
        .unwrap_or_else(|_| {
            let radix = f64::from(radix);
            let value = digits
                .chars()
                .filter_map(|c| c.to_digit(16))
                .fold(0.0, |acc, digit| acc * radix + f64::from(digit));
            Numeric::Approximate(value)
        });
    Some(Some(numeric))
}

/// `digits [. digits] [exponent]` or `. digits [exponent]`.
fn is_decimal_literal(text: &str) -> bool {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(index) => (&text[..index], Some(&text[index + 1..])),
        None => (text, None),
    };

    let (integral, fraction) = match mantissa.split_once('.') {
        Some((integral, fraction)) => (integral, Some(fraction)),
        None => (mantissa, None),
    };
    let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    if !is_digits(integral) || !fraction.is_none_or(is_digits) {
        return false;
    }
    if integral.is_empty() && fraction.is_none_or(str::is_empty) {
        return false;
    }

    match exponent {
        None => true,
        Some(exponent) => {
            let digits = exponent
                .strip_prefix(['+', '-'])
                .unwrap_or(exponent);
            !digits.is_empty() && is_digits(digits)
        }
    }
}

/// ECMAScript `WhiteSpace` and `LineTerminator` code points.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests;
