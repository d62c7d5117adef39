//! Address Canonicalization
//!
//! Converts between the chain-native bech32 strings contracts put into
//! messages and the fixed-length binary form carried in the environment.

use bech32::{FromBase32, ToBase32, Variant};

use crate::config::AddressConfig;
use crate::error::ValidationError;
use crate::types::CanonicalAddress;

/// Default bech32 prefix for Cosmos addresses
pub const DEFAULT_BECH32_PREFIX: &str = "cosmos";

/// Standard Cosmos account address length in bytes
pub const DEFAULT_CANONICAL_LENGTH: usize = 20;

/// Address canonicalization service supplied by the host
pub trait AddressApi {
    /// Parse a human-readable address into its canonical bytes
    fn canonicalize(&self, human: &str) -> Result<CanonicalAddress, ValidationError>;

    /// Render canonical bytes as a human-readable address
    fn humanize(&self, canonical: &CanonicalAddress) -> Result<String, ValidationError>;
}

/// Bech32 addresses with a fixed prefix and canonical length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bech32AddressApi {
    prefix: String,
    canonical_length: usize,
}

impl Bech32AddressApi {
    pub fn new(prefix: impl Into<String>, canonical_length: usize) -> Self {
        Self {
            prefix: prefix.into(),
            canonical_length,
        }
    }

    pub fn from_config(config: &AddressConfig) -> Self {
        Self::new(config.bech32_prefix.clone(), config.canonical_length)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn canonical_length(&self) -> usize {
        self.canonical_length
    }

    fn check_length(&self, actual: usize) -> Result<(), ValidationError> {
        if actual != self.canonical_length {
            return Err(ValidationError::InvalidAddressLength {
                expected: self.canonical_length,
                actual,
            });
        }
        Ok(())
    }
}

impl Default for Bech32AddressApi {
    fn default() -> Self {
        Self::new(DEFAULT_BECH32_PREFIX, DEFAULT_CANONICAL_LENGTH)
    }
}

impl AddressApi for Bech32AddressApi {
    fn canonicalize(&self, human: &str) -> Result<CanonicalAddress, ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidAddress {
            address: human.to_string(),
            reason,
        };

        let (hrp, data, variant) =
            bech32::decode(human).map_err(|e| invalid(format!("invalid bech32: {}", e)))?;

        if variant != Variant::Bech32 {
            return Err(invalid("invalid bech32 variant".to_string()));
        }
        if hrp != self.prefix {
            return Err(invalid(format!("expected prefix {}, got {}", self.prefix, hrp)));
        }

        let bytes = Vec::<u8>::from_base32(&data)
            .map_err(|e| invalid(format!("invalid base32 data: {}", e)))?;
        self.check_length(bytes.len())?;

        Ok(CanonicalAddress::from(bytes))
    }

    fn humanize(&self, canonical: &CanonicalAddress) -> Result<String, ValidationError> {
        self.check_length(canonical.len())?;

        bech32::encode(&self.prefix, canonical.as_slice().to_base32(), Variant::Bech32).map_err(|e| {
            ValidationError::InvalidAddress {
                address: canonical.to_string(),
                reason: format!("cannot encode: {}", e),
            }
        })
    }
}
