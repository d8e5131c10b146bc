//! Range settings for tunable actuators.
//!
//! Settings are built from the raw strings a user supplied and are immutable
//! once constructed. Changing an actuator's limits means building new
//! settings and rebinding them (see
//! [`Actuator::rebind_settings`](crate::component::Actuator::rebind_settings)).

use serde::Serialize;

use crate::decimal::Decimal;
use crate::error::ValidationError;

/// Validated integer bounds, `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntegerSettings {
    lower: i64,
    upper: i64,
}

impl IntegerSettings {
    /// Parse and validate integer limits.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidNumber`] when either limit is not an
    /// integer and [`ValidationError::LowerNotBelowUpper`] when
    /// `lower >= upper`.
    pub fn new(lower: &str, upper: &str) -> Result<Self, ValidationError> {
        let lower = parse_integer("lower", lower)?;
        let upper = parse_integer("upper", upper)?;
        if lower >= upper {
            return Err(ValidationError::LowerNotBelowUpper);
        }
        Ok(Self { lower, upper })
    }

    #[must_use]
    pub fn lower(&self) -> i64 {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// `[lower, upper]` in declaration order.
    #[must_use]
    pub fn value(&self) -> [i64; 2] {
        [self.lower, self.upper]
    }

    /// Whether `value` lies within the inclusive range.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

/// Validated decimal bounds with a precision step.
///
/// Invariants: `lower < upper`, `0 < precision < 1`, and neither limit was
/// written with more fractional digits than `precision`. The digit rule is
/// applied to the literal text, so `"1.10"` is rejected against a precision
/// of `"0.1"` even though it equals `1.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecimalSettings {
    lower: Decimal,
    upper: Decimal,
    precision: Decimal,
}

impl DecimalSettings {
    /// Parse and validate decimal limits and precision.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidNumber`] when any input is not a decimal
    /// - [`ValidationError::PrecisionOutOfRange`] unless `0 < precision < 1`
    /// - [`ValidationError::LowerNotBelowUpper`] when `lower >= upper`
    /// - [`ValidationError::PrecisionMismatch`] when a limit has more
    ///   fractional digits than `precision`
    pub fn new(lower: &str, upper: &str, precision: &str) -> Result<Self, ValidationError> {
        let lower_value = parse_decimal("lower", lower)?;
        let upper_value = parse_decimal("upper", upper)?;
        let precision_value = parse_decimal("precision", precision)?;

        if precision_value <= Decimal::ZERO || precision_value >= Decimal::ONE {
            return Err(ValidationError::PrecisionOutOfRange);
        }
        if lower_value >= upper_value {
            return Err(ValidationError::LowerNotBelowUpper);
        }
        let allowed = precision_value.fraction_digits();
        if lower_value.fraction_digits() > allowed {
            return Err(ValidationError::PrecisionMismatch { field: "lower" });
        }
        if upper_value.fraction_digits() > allowed {
            return Err(ValidationError::PrecisionMismatch { field: "upper" });
        }

        Ok(Self {
            lower: lower_value,
            upper: upper_value,
            precision: precision_value,
        })
    }

    #[must_use]
    pub fn lower(&self) -> Decimal {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> Decimal {
        self.upper
    }

    #[must_use]
    pub fn precision(&self) -> Decimal {
        self.precision
    }

    /// `[lower, upper, precision]` in declaration order.
    #[must_use]
    pub fn value(&self) -> [Decimal; 3] {
        [self.lower, self.upper, self.precision]
    }

    /// Whether `value` lies within the inclusive range.
    #[must_use]
    pub fn contains(&self, value: Decimal) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

/// Range settings of either flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RangeSettings {
    Integer(IntegerSettings),
    Decimal(DecimalSettings),
}

/// One parsed number out of [`RangeSettings::value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Integer(i64),
    Decimal(Decimal),
}

impl RangeSettings {
    /// Shorthand for [`IntegerSettings::new`].
    ///
    /// # Errors
    ///
    /// See [`IntegerSettings::new`].
    pub fn integer(lower: &str, upper: &str) -> Result<Self, ValidationError> {
        IntegerSettings::new(lower, upper).map(Self::Integer)
    }

    /// Shorthand for [`DecimalSettings::new`].
    ///
    /// # Errors
    ///
    /// See [`DecimalSettings::new`].
    pub fn decimal(lower: &str, upper: &str, precision: &str) -> Result<Self, ValidationError> {
        DecimalSettings::new(lower, upper, precision).map(Self::Decimal)
    }

    /// `[lower, upper, precision?]`; precision is absent for integer settings.
    #[must_use]
    pub fn value(&self) -> Vec<SettingValue> {
        match self {
            Self::Integer(s) => s.value().into_iter().map(SettingValue::Integer).collect(),
            Self::Decimal(s) => s.value().into_iter().map(SettingValue::Decimal).collect(),
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<&IntegerSettings> {
        match self {
            Self::Integer(s) => Some(s),
            Self::Decimal(_) => None,
        }
    }

    #[must_use]
    pub fn as_decimal(&self) -> Option<&DecimalSettings> {
        match self {
            Self::Decimal(s) => Some(s),
            Self::Integer(_) => None,
        }
    }
}

fn parse_integer(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    raw.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}
