//! Query Response Model
//!
//! Read-only queries answer with `ok: bytes | err: string`. Queries carry no
//! messages, gas or log, so there is nothing to dispatch.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::error::{DecodeError, EncodingError};
use crate::types::Binary;
use crate::wire::{select_arm, Arm, WireQueryResponse};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "WireQueryResponse")]
pub enum QueryResponse {
    Ok(Binary),
    Err(String),
}

impl QueryResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let wire: WireQueryResponse = serde_json::from_slice(bytes)?;
        QueryResponse::try_from(wire)
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        if matches!(self, QueryResponse::Err(err) if err.is_empty()) {
            return Err(EncodingError::EmptyError);
        }
        Ok(serde_json::to_vec(self)?)
    }

    pub fn into_result(self) -> Result<Binary, String> {
        match self {
            QueryResponse::Ok(data) => Ok(data),
            QueryResponse::Err(err) => Err(err),
        }
    }
}

impl TryFrom<WireQueryResponse> for QueryResponse {
    type Error = DecodeError;

    fn try_from(wire: WireQueryResponse) -> Result<Self, Self::Error> {
        let response = match select_arm(wire.ok, wire.err, Binary::is_empty)? {
            Arm::Ok(data) => QueryResponse::Ok(data),
            Arm::Err(err) => QueryResponse::Err(err),
        };
        debug!("Decoded query envelope (ok: {})", matches!(response, QueryResponse::Ok(_)));
        Ok(response)
    }
}

impl Serialize for QueryResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryResponse::Ok(data) => {
                let mut state = serializer.serialize_struct("QueryResponse", 2)?;
                state.serialize_field("ok", data)?;
                state.serialize_field("err", "")?;
                state.end()
            }
            QueryResponse::Err(err) => {
                let mut state = serializer.serialize_struct("QueryResponse", 1)?;
                state.serialize_field("err", err)?;
                state.end()
            }
        }
    }
}
