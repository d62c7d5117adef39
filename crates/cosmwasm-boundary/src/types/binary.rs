use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque bytes, carried in JSON as a standard base64 string
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Binary(Vec<u8>);

impl Binary {
    pub fn new(data: Vec<u8>) -> Self {
        Binary(data)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        let decoded = STANDARD.decode(encoded)?;
        Ok(Binary(decoded))
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binary({})", self.to_base64())
    }
}

impl From<Vec<u8>> for Binary {
    fn from(vec: Vec<u8>) -> Self {
        Binary(vec)
    }
}

impl From<&[u8]> for Binary {
    fn from(slice: &[u8]) -> Self {
        Binary(slice.to_vec())
    }
}

impl AsRef<[u8]> for Binary {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Binary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Binary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Binary::from_base64(&encoded).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

/// Binary form of an account or contract identity.
///
/// The exact length is fixed by the chain's address scheme; this type does not
/// enforce it. Length checks live with whoever knows the scheme (the host
/// configuration or an [`AddressApi`](crate::address::AddressApi)).
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CanonicalAddress(Binary);

impl CanonicalAddress {
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_slice())
    }
}

impl fmt::Debug for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalAddress(0x{})", self.to_hex())
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl From<Vec<u8>> for CanonicalAddress {
    fn from(vec: Vec<u8>) -> Self {
        CanonicalAddress(Binary(vec))
    }
}

impl From<&[u8]> for CanonicalAddress {
    fn from(slice: &[u8]) -> Self {
        CanonicalAddress(Binary(slice.to_vec()))
    }
}
