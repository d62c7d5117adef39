//! Result/Response Model
//!
//! The guest answers `init` and `handle` with an ok/err envelope. On the wire
//! both keys may appear; in memory exactly one arm exists.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::{DecodeError, EncodingError, ValidationError};
use crate::msg::CosmosMsg;
use crate::wire::{select_arm, Arm, WireCosmosResponse, WireResult};

/// Key/value pair emitted as an ABCI event attribute.
///
/// Order is preserved and duplicate keys are allowed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogAttribute {
    pub key: String,
    pub value: String,
}

impl LogAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        LogAttribute {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Successful outcome of a contract call
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(try_from = "WireResult")]
pub struct ContractResult {
    /// Advisory only: the host overwrites this with its own metering
    pub gas_used: u64,
    /// Requested actions, in dispatch order
    pub messages: Vec<CosmosMsg>,
    /// Base64 payload returned to the caller verbatim
    pub data: String,
    pub log: Vec<LogAttribute>,
}

impl ContractResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_message(mut self, msg: impl Into<CosmosMsg>) -> Self {
        self.messages.push(msg.into());
        self
    }

    pub fn add_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.log.push(LogAttribute::new(key, value));
        self
    }

    pub fn set_data(mut self, data: &[u8]) -> Self {
        self.data = STANDARD.encode(data);
        self
    }

    /// Decodes the base64 `data` field
    pub fn data_bytes(&self) -> Result<Vec<u8>, ValidationError> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| ValidationError::InvalidData(e.to_string()))
    }
}

impl TryFrom<WireResult> for ContractResult {
    type Error = DecodeError;

    fn try_from(wire: WireResult) -> Result<Self, Self::Error> {
        // All-or-nothing: one bad message rejects the whole result
        let messages = wire
            .messages
            .into_iter()
            .enumerate()
            .map(|(index, msg)| {
                CosmosMsg::try_from(msg).map_err(|e| {
                    warn!("Message {} in contract result rejected: {}", index, e);
                    e
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ContractResult {
            gas_used: wire.gas_used,
            messages,
            data: wire.data,
            log: wire.log,
        })
    }
}

/// Raw response from the `init` / `handle` calls
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "WireCosmosResponse")]
pub enum CosmosResponse {
    Ok(ContractResult),
    Err(String),
}

impl CosmosResponse {
    /// Parses the envelope and every message inside it.
    ///
    /// Fails with `AmbiguousEnvelope` when both arms carry data and with
    /// `EmptyEnvelope` when neither does.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let wire: WireCosmosResponse = serde_json::from_slice(bytes)?;
        CosmosResponse::try_from(wire)
    }

    /// Encodes in the shape the decoder accepts: `{"ok":{..},"err":""}` or `{"err":".."}`
    ///
    /// An empty `err` would read back as an empty envelope, so it is refused.
    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        if matches!(self, CosmosResponse::Err(err) if err.is_empty()) {
            return Err(EncodingError::EmptyError);
        }
        Ok(serde_json::to_vec(self)?)
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CosmosResponse::Ok(_))
    }

    pub fn into_result(self) -> Result<ContractResult, String> {
        match self {
            CosmosResponse::Ok(result) => Ok(result),
            CosmosResponse::Err(err) => Err(err),
        }
    }
}

impl From<ContractResult> for CosmosResponse {
    fn from(result: ContractResult) -> Self {
        CosmosResponse::Ok(result)
    }
}

impl TryFrom<WireCosmosResponse> for CosmosResponse {
    type Error = DecodeError;

    fn try_from(wire: WireCosmosResponse) -> Result<Self, Self::Error> {
        match select_arm(wire.ok, wire.err, WireResult::is_zero)? {
            Arm::Ok(result) => {
                let result = ContractResult::try_from(result)?;
                debug!(
                    "Decoded ok envelope with {} messages and {} log attributes",
                    result.messages.len(),
                    result.log.len()
                );
                Ok(CosmosResponse::Ok(result))
            }
            Arm::Err(err) => {
                debug!("Decoded err envelope: {}", err);
                Ok(CosmosResponse::Err(err))
            }
        }
    }
}

impl Serialize for CosmosResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CosmosResponse::Ok(result) => {
                let mut state = serializer.serialize_struct("CosmosResponse", 2)?;
                state.serialize_field("ok", result)?;
                state.serialize_field("err", "")?;
                state.end()
            }
            CosmosResponse::Err(err) => {
                let mut state = serializer.serialize_struct("CosmosResponse", 1)?;
                state.serialize_field("err", err)?;
                state.end()
            }
        }
    }
}
