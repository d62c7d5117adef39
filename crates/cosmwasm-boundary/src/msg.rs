//! Action Message Model
//!
//! A contract asks the host for side effects by returning `CosmosMsg` values.
//! On the wire a message is an object with exactly one of the keys `send`,
//! `contract` or `opaque`; in memory it is an enum, so the zero-set and
//! multi-set states cannot be represented once decoding has succeeded.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DecodeError, EncodingError, ValidationError};
use crate::types::{Binary, Coin};
use crate::wire::{WireCoin, WireContractMsg, WireCosmosMsg, WireOpaqueMsg, WireSendMsg};

/// A single dispatchable action requested by a contract
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case", try_from = "WireCosmosMsg")]
pub enum CosmosMsg {
    Send(SendMsg),
    Contract(ContractMsg),
    Opaque(OpaqueMsg),
}

/// Plain value transfer between two chain-native (bech32) addresses
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SendMsg {
    pub from_address: String,
    pub to_address: String,
    pub amount: Vec<Coin>,
}

/// Call into another contract.
///
/// `msg` is handed to the target contract untouched; neither the host nor this
/// crate looks inside it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContractMsg {
    pub contract_addr: String,
    pub msg: Binary,
    /// Funds forwarded to the callee, empty when nothing is sent
    pub send: Vec<Coin>,
}

/// A pre-authorized SDK message supplied by a user and relayed verbatim.
///
/// Contracts only ever re-emit bytes that reached them from outside; the
/// payload is passed through without interpretation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OpaqueMsg {
    pub data: Binary,
}

impl CosmosMsg {
    /// Decodes one message, enforcing the single-variant rule
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let wire: WireCosmosMsg = serde_json::from_slice(bytes)?;
        CosmosMsg::try_from(wire)
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Wire key of the active variant
    pub fn kind(&self) -> &'static str {
        match self {
            CosmosMsg::Send(_) => "send",
            CosmosMsg::Contract(_) => "contract",
            CosmosMsg::Opaque(_) => "opaque",
        }
    }
}

impl From<SendMsg> for CosmosMsg {
    fn from(msg: SendMsg) -> Self {
        CosmosMsg::Send(msg)
    }
}

impl From<ContractMsg> for CosmosMsg {
    fn from(msg: ContractMsg) -> Self {
        CosmosMsg::Contract(msg)
    }
}

impl From<OpaqueMsg> for CosmosMsg {
    fn from(msg: OpaqueMsg) -> Self {
        CosmosMsg::Opaque(msg)
    }
}

impl TryFrom<WireCosmosMsg> for CosmosMsg {
    type Error = DecodeError;

    fn try_from(wire: WireCosmosMsg) -> Result<Self, Self::Error> {
        let found = wire.variant_count();
        match (wire.send, wire.contract, wire.opaque) {
            (Some(send), None, None) => Ok(CosmosMsg::Send(send.try_into()?)),
            (None, Some(contract), None) => Ok(CosmosMsg::Contract(contract.try_into()?)),
            (None, None, Some(opaque)) => Ok(CosmosMsg::Opaque(opaque.into())),
            _ => {
                warn!("Rejecting message with {} variants set", found);
                Err(DecodeError::InvalidVariantCount { found })
            }
        }
    }
}

impl TryFrom<WireSendMsg> for SendMsg {
    type Error = ValidationError;

    fn try_from(wire: WireSendMsg) -> Result<Self, Self::Error> {
        Ok(SendMsg {
            from_address: wire.from_address,
            to_address: wire.to_address,
            amount: parse_coins(wire.amount)?,
        })
    }
}

impl TryFrom<WireContractMsg> for ContractMsg {
    type Error = ValidationError;

    fn try_from(wire: WireContractMsg) -> Result<Self, Self::Error> {
        Ok(ContractMsg {
            contract_addr: wire.contract_addr,
            msg: wire.msg,
            send: parse_coins(wire.send)?,
        })
    }
}

impl From<WireOpaqueMsg> for OpaqueMsg {
    fn from(wire: WireOpaqueMsg) -> Self {
        OpaqueMsg { data: wire.data }
    }
}

fn parse_coins(coins: Vec<WireCoin>) -> Result<Vec<Coin>, ValidationError> {
    coins
        .into_iter()
        .map(|c| Coin::parse(c.denom, &c.amount))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::coin;
    use pretty_assertions::assert_eq;

    fn send_msg() -> CosmosMsg {
        CosmosMsg::Send(SendMsg {
            from_address: "cosmos1from".to_string(),
            to_address: "cosmos1to".to_string(),
            amount: vec![coin(500, "uatom")],
        })
    }

    #[test]
    fn test_send_wire_format() {
        let json = String::from_utf8(send_msg().encode().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"send":{"from_address":"cosmos1from","to_address":"cosmos1to","amount":[{"denom":"uatom","amount":"500"}]}}"#
        );
    }

    #[test]
    fn test_round_trip_each_variant() {
        let messages = vec![
            send_msg(),
            CosmosMsg::Contract(ContractMsg {
                contract_addr: "cosmos1contract".to_string(),
                msg: Binary::from(br#"{"transfer":{}}"#.to_vec()),
                send: vec![Coin::parse("ujuno", "12.3456").unwrap()],
            }),
            CosmosMsg::Opaque(OpaqueMsg {
                data: Binary::from(vec![0xde, 0xad, 0xbe, 0xef]),
            }),
        ];

        for msg in messages {
            let bytes = msg.encode().unwrap();
            assert_eq!(CosmosMsg::decode(&bytes).unwrap(), msg);
        }
    }

    #[test]
    fn test_zero_variants_rejected() {
        for raw in [r#"{}"#, r#"{"send":null}"#, r#"{"burn":{"amount":[]}}"#] {
            let err = CosmosMsg::decode(raw.as_bytes()).unwrap_err();
            assert!(
                matches!(err, DecodeError::InvalidVariantCount { found: 0 }),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn test_multiple_variants_rejected() {
        let two = r#"{"send":{"from_address":"a","to_address":"b","amount":[]},"opaque":{"data":""}}"#;
        let err = CosmosMsg::decode(two.as_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidVariantCount { found: 2 }));

        let three = r#"{"send":{},"contract":{},"opaque":{}}"#;
        let err = CosmosMsg::decode(three.as_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidVariantCount { found: 3 }));
    }

    #[test]
    fn test_go_nil_fields_decode() {
        let raw = r#"{"contract":{"contract_addr":"cosmos1c","msg":null,"send":null}}"#;
        let msg = CosmosMsg::decode(raw.as_bytes()).unwrap();
        match msg {
            CosmosMsg::Contract(contract) => {
                assert!(contract.msg.is_empty());
                assert!(contract.send.is_empty());
            }
            other => panic!("unexpected variant {}", other.kind()),
        }
    }

    #[test]
    fn test_bad_amount_rejected_at_decode() {
        let raw = r#"{"send":{"from_address":"a","to_address":"b","amount":[{"denom":"uatom","amount":"-1"}]}}"#;
        let err = CosmosMsg::decode(raw.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Invalid(ValidationError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_serde_deserialize_enforces_variant_count() {
        let result: Result<CosmosMsg, _> = serde_json::from_str(r#"{"opaque":{"data":""},"contract":{}}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }
}
