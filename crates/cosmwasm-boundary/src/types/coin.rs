use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::types::decimal::Decimal;

/// Represents a coin with denomination and amount.
///
/// The amount is a string on the wire (`{"denom":"uatom","amount":"500"}`)
/// and an exact [`Decimal`] in memory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    pub amount: Decimal,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<Decimal>) -> Self {
        Coin {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    /// Builds a coin from the string amount as it appears on the wire
    pub fn parse(denom: impl Into<String>, amount: &str) -> Result<Self, ValidationError> {
        Ok(Coin {
            denom: denom.into(),
            amount: amount.parse()?,
        })
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Shorthand for a whole-number coin
pub fn coin(amount: u128, denom: &str) -> Coin {
    Coin::new(denom, amount)
}
