// Wire shapes of guest output, exactly as the JSON arrives.
//
// Sum types are still several optional fields here; conversion into the typed
// model (msg.rs, response.rs, query.rs) is the only place they are collapsed.
// An absent key and an explicit `null` both decode to `None`, and Go-style
// `null` slices decode to empty ones.

use serde::{Deserialize, Deserializer};

use crate::error::DecodeError;
use crate::response::LogAttribute;
use crate::types::Binary;

/// Treats an explicit `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireCoin {
    #[serde(default, deserialize_with = "null_as_default")]
    pub denom: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireSendMsg {
    #[serde(default, deserialize_with = "null_as_default")]
    pub from_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: Vec<WireCoin>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireContractMsg {
    #[serde(default, deserialize_with = "null_as_default")]
    pub contract_addr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub msg: Binary,
    #[serde(default, deserialize_with = "null_as_default")]
    pub send: Vec<WireCoin>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireOpaqueMsg {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Binary,
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireCosmosMsg {
    pub send: Option<WireSendMsg>,
    pub contract: Option<WireContractMsg>,
    pub opaque: Option<WireOpaqueMsg>,
}

impl WireCosmosMsg {
    pub fn variant_count(&self) -> usize {
        [
            self.send.is_some(),
            self.contract.is_some(),
            self.opaque.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub gas_used: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<WireCosmosMsg>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub log: Vec<LogAttribute>,
}

impl WireResult {
    /// True for the zero value a Go host writes next to an `err`
    pub fn is_zero(&self) -> bool {
        self.gas_used == 0 && self.messages.is_empty() && self.data.is_empty() && self.log.is_empty()
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireCosmosResponse {
    pub ok: Option<WireResult>,
    pub err: Option<String>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireQueryResponse {
    pub ok: Option<Binary>,
    pub err: Option<String>,
}

/// The populated arm of an ok/err envelope
#[derive(Debug)]
pub(crate) enum Arm<T> {
    Ok(T),
    Err(String),
}

/// Collapses an ok/err pair into exactly one arm.
///
/// `err` counts as set when it is a non-empty string. `ok` counts as set when
/// present and not `null`; next to a set `err` it only conflicts if it is not
/// the zero value, since Go encoders always emit both keys.
pub(crate) fn select_arm<T>(
    ok: Option<T>,
    err: Option<String>,
    is_zero: impl Fn(&T) -> bool,
) -> Result<Arm<T>, DecodeError> {
    let err = err.filter(|e| !e.is_empty());
    match (ok, err) {
        (Some(ok), Some(_)) if !is_zero(&ok) => Err(DecodeError::AmbiguousEnvelope),
        (_, Some(err)) => Ok(Arm::Err(err)),
        (Some(ok), None) => Ok(Arm::Ok(ok)),
        (None, None) => Err(DecodeError::EmptyEnvelope),
    }
}
