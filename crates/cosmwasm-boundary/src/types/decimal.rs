use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Largest integer part accepted, in digits (enough for a 256-bit amount)
pub const MAX_INTEGER_DIGITS: usize = 78;

/// Largest fractional part accepted, in digits (the Cosmos SDK `Dec` precision)
pub const MAX_FRACTION_DIGITS: usize = 18;

/// Non-negative decimal with exact, arbitrary precision.
///
/// Held as normalized digit strings: `integer` has no leading zeros (except a
/// lone `"0"`) and `fraction` has no trailing zeros. Two amounts that denote
/// the same number therefore compare equal, e.g. `"12.30"` and `"012.3"`.
/// Values never pass through a binary float.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    integer: String,
    fraction: String,
}

impl Decimal {
    pub fn zero() -> Self {
        Decimal {
            integer: "0".to_string(),
            fraction: String::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.integer == "0" && self.fraction.is_empty()
    }

    pub fn is_integer(&self) -> bool {
        self.fraction.is_empty()
    }

    /// Integer part as digits
    pub fn integer_digits(&self) -> &str {
        &self.integer
    }

    /// Fractional part as digits, empty for whole numbers
    pub fn fraction_digits(&self) -> &str {
        &self.fraction
    }

    /// Returns the value as `u128` if it is a whole number that fits
    pub fn to_u128(&self) -> Option<u128> {
        if !self.is_integer() {
            return None;
        }
        self.integer.parse().ok()
    }
}

impl FromStr for Decimal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &'static str| ValidationError::InvalidAmount {
            amount: s.to_string(),
            reason,
        };

        if s.is_empty() {
            return Err(invalid("empty"));
        }
        if s.starts_with('-') {
            return Err(invalid("negative"));
        }

        let (int_part, frac_part) = match s.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (s, None),
        };

        if !is_digits(int_part) {
            return Err(invalid("not a decimal number"));
        }
        let frac_part = match frac_part {
            Some(frac) if !is_digits(frac) => return Err(invalid("not a decimal number")),
            Some(frac) => frac,
            None => "",
        };

        let integer = match int_part.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        };
        let fraction = frac_part.trim_end_matches('0');

        if integer.len() > MAX_INTEGER_DIGITS {
            return Err(invalid("too many integer digits"));
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(invalid("too many fractional digits"));
        }

        Ok(Decimal {
            integer: integer.to_string(),
            fraction: fraction.to_string(),
        })
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl From<u128> for Decimal {
    fn from(value: u128) -> Self {
        Decimal {
            integer: value.to_string(),
            fraction: String::new(),
        }
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal::from(u128::from(value))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fraction.is_empty() {
            f.write_str(&self.integer)
        } else {
            write!(f, "{}.{}", self.integer, self.fraction)
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self)
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        // Normalized digits: a longer integer part is larger, and fractional
        // digit strings order lexicographically.
        self.integer
            .len()
            .cmp(&other.integer.len())
            .then_with(|| self.integer.cmp(&other.integer))
            .then_with(|| self.fraction.cmp(&other.fraction))
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
