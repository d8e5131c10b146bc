//! Exact base-10 decimal numbers.
//!
//! Range settings compare limits and count fractional digits on the literal
//! text a user typed, so values are kept as an integer number of units plus
//! the number of fractional digits they were written with (`"1.10"` keeps a
//! scale of 2). Comparison is numeric, never through floating point.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum number of digits accepted on either side of the decimal point.
pub const MAX_DIGITS: u32 = 18;

/// A decimal number that remembers how many fractional digits it was written with.
#[derive(Debug, Clone, Copy)]
pub struct Decimal {
    units: i128,
    scale: u32,
}

/// Text that is not a plain decimal literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDecimalError {
    #[error("empty decimal literal")]
    Empty,
    #[error("invalid character {0:?} in decimal literal")]
    InvalidCharacter(char),
    #[error("decimal literal has more than {MAX_DIGITS} digits on one side of the point")]
    TooManyDigits,
}

impl Decimal {
    pub const ZERO: Self = Self { units: 0, scale: 0 };
    pub const ONE: Self = Self { units: 1, scale: 0 };

    /// Number of fractional digits in the literal this value was parsed from.
    #[must_use]
    pub fn fraction_digits(&self) -> u32 {
        self.scale
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.units == 0
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.units < 0
    }

    /// Round half away from zero to `digits` fractional digits.
    ///
    /// Values that already have `digits` or fewer fractional digits are
    /// returned unchanged.
    #[must_use]
    pub fn round_to(&self, digits: u32) -> Self {
        if self.scale <= digits {
            return *self;
        }
        let divisor = pow10(self.scale - digits);
        let quotient = self.units / divisor;
        let remainder = (self.units % divisor).abs();
        let bump = if remainder * 2 >= divisor {
            self.units.signum()
        } else {
            0
        };
        Self {
            units: quotient + bump,
            scale: digits,
        }
    }

    /// Lossy conversion for presentation and hardware collaborators.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Units of `self` expressed at `scale`, which must be `>= self.scale`.
    fn units_at(&self, scale: u32) -> i128 {
        self.units * pow10(scale - self.scale)
    }
}

fn pow10(exp: u32) -> i128 {
    10_i128.pow(exp)
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseDecimalError::Empty);
        }
        if let Some(bad) = int_part
            .chars()
            .chain(frac_part.chars())
            .find(|c| !c.is_ascii_digit())
        {
            return Err(ParseDecimalError::InvalidCharacter(bad));
        }

        let significant = int_part.trim_start_matches('0');
        let scale = u32::try_from(frac_part.len()).map_err(|_| ParseDecimalError::TooManyDigits)?;
        if significant.len() > MAX_DIGITS as usize || scale > MAX_DIGITS {
            return Err(ParseDecimalError::TooManyDigits);
        }

        let mut units: i128 = 0;
        for digit in significant.bytes().chain(frac_part.bytes()) {
            units = units * 10 + i128::from(digit - b'0');
        }
        if negative {
            units = -units;
        }
        Ok(Self { units, scale })
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        self.units_at(scale).cmp(&other.units_at(scale))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.units < 0 { "-" } else { "" };
        let magnitude = self.units.unsigned_abs();
        if self.scale == 0 {
            return write!(f, "{sign}{magnitude}");
        }
        let divisor = pow10(self.scale).unsigned_abs();
        let width = self.scale as usize;
        write!(
            f,
            "{sign}{}.{:0>width$}",
            magnitude / divisor,
            magnitude % divisor
        )
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn should_count_fraction_digits_from_literal() {
        assert_eq!(dec("1.0").fraction_digits(), 1);
        assert_eq!(dec("1.10").fraction_digits(), 2);
        assert_eq!(dec("7").fraction_digits(), 0);
        assert_eq!(dec("0.001").fraction_digits(), 3);
    }

    #[test]
    fn should_compare_numerically_across_scales() {
        assert_eq!(dec("1.0"), dec("1.00"));
        assert!(dec("1.05") > dec("1.0"));
        assert!(dec("-0.5") < dec("0"));
    }

    #[test]
    fn should_parse_leading_point_and_trailing_point() {
        assert_eq!(dec(".5"), dec("0.5"));
        assert_eq!(dec("3."), dec("3"));
        assert_eq!(dec("3.").fraction_digits(), 0);
    }

    #[test]
    fn should_parse_signed_values() {
        assert!(dec("-2.25").is_negative());
        assert_eq!(dec("+2.25"), dec("2.25"));
    }

    #[test]
    fn should_reject_non_numeric_text() {
        assert_eq!(
            "teste".parse::<Decimal>(),
            Err(ParseDecimalError::InvalidCharacter('t'))
        );
        assert_eq!("".parse::<Decimal>(), Err(ParseDecimalError::Empty));
        assert_eq!(".".parse::<Decimal>(), Err(ParseDecimalError::Empty));
        assert!("1e3".parse::<Decimal>().is_err());
        assert!(" 1".parse::<Decimal>().is_err());
        assert!("1.2.3".parse::<Decimal>().is_err());
    }

    #[test]
    fn should_reject_overlong_literals() {
        assert_eq!(
            "0.1234567890123456789".parse::<Decimal>(),
            Err(ParseDecimalError::TooManyDigits)
        );
    }

    #[test]
    fn should_reject_lone_sign_or_point() {
        assert_eq!("-".parse::<Decimal>(), Err(ParseDecimalError::Empty));
        assert_eq!("+".parse::<Decimal>(), Err(ParseDecimalError::Empty));
        assert_eq!("-.".parse::<Decimal>(), Err(ParseDecimalError::Empty));
        assert_eq!(
            "--1".parse::<Decimal>(),
            Err(ParseDecimalError::InvalidCharacter('-'))
        );
    }

    #[test]
    fn should_accept_eighteen_digits_on_each_side_of_point() {
        let widest = dec("-123456789012345678.123456789012345678");
        assert_eq!(widest.fraction_digits(), 18);
        assert_eq!(widest.to_string(), "-123456789012345678.123456789012345678");
        assert!(widest < dec("-123456789012345678.12345678901234567"));
    }

    #[test]
    fn should_reject_nineteen_digits_on_either_side_of_point() {
        assert_eq!(
            "1234567890123456789".parse::<Decimal>(),
            Err(ParseDecimalError::TooManyDigits)
        );
        assert_eq!(
            "1.1234567890123456789".parse::<Decimal>(),
            Err(ParseDecimalError::TooManyDigits)
        );
    }

    #[test]
    fn should_ignore_leading_zeros_when_counting_digits() {
        let padded = dec("000000123456789012345678.5");
        assert_eq!(padded, dec("123456789012345678.5"));
    }

    #[test]
    fn should_display_with_parsed_scale() {
        assert_eq!(dec("1.10").to_string(), "1.10");
        assert_eq!(dec("-0.05").to_string(), "-0.05");
        assert_eq!(dec("42").to_string(), "42");
    }

    #[test]
    fn should_round_half_away_from_zero() {
        assert_eq!(dec("21.55").round_to(1).to_string(), "21.6");
        assert_eq!(dec("21.54").round_to(1).to_string(), "21.5");
        assert_eq!(dec("-21.55").round_to(1).to_string(), "-21.6");
        assert_eq!(dec("21.5").round_to(2).to_string(), "21.5");
    }

    #[test]
    fn should_convert_to_f64() {
        assert!((dec("21.5").to_f64() - 21.5).abs() < f64::EPSILON);
    }

    #[test]
    fn should_serialize_as_string() {
        let json = serde_json::to_string(&dec("0.10")).unwrap();
        assert_eq!(json, "\"0.10\"");
        let parsed: Decimal = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.fraction_digits(), 2);
    }
}
