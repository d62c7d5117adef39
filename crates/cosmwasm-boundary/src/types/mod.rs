// Primitive types shared by the environment, message and response models

pub mod binary;
pub mod coin;
pub mod decimal;
pub mod trust;

// Re-export primitives for easy access
pub use binary::{Binary, CanonicalAddress};
pub use coin::{coin, Coin};
pub use decimal::{Decimal, MAX_FRACTION_DIGITS, MAX_INTEGER_DIGITS};
pub use trust::{Trusted, Verified};
