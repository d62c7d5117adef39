use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DecodeError, EncodingError};
use crate::types::{CanonicalAddress, Coin, Trusted};

/// State of the blockchain environment a contract call runs in.
///
/// Holds only trusted data: nothing from the transaction that has not been
/// verified already (the signer is checked before we get here). The host
/// builds it with [`Env::assemble`]; the guest only ever decodes it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Env {
    pub block: BlockInfo,
    pub message: MessageInfo,
    pub contract: ContractInfo,
    #[serde(rename = "contract_key")]
    pub key: ContractKey,
}

/// Block information
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlockInfo {
    /// Height of the block this transaction is executed in
    pub height: u64,
    /// Seconds since the unix epoch
    pub time: u64,
    pub chain_id: String,
}

/// Message info containing signer and funds
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageInfo {
    /// Canonical address of the account executing the contract
    pub signer: CanonicalAddress,
    /// Funds sent to the contract along with this message
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub sent_funds: Vec<Coin>,
}

/// Contract information
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContractInfo {
    /// Canonical address of the contract, used when sending messages
    pub address: CanonicalAddress,
    /// Current balance of the account controlled by the contract
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub balance: Vec<Coin>,
}

/// Opaque identifier of the contract's storage namespace
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContractKey(pub String);

impl ContractKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContractKey {
    fn from(s: &str) -> Self {
        ContractKey(s.to_string())
    }
}

impl From<String> for ContractKey {
    fn from(s: String) -> Self {
        ContractKey(s)
    }
}

impl Env {
    /// Assemble the environment from trusted chain state.
    ///
    /// Checks the invariants the host's inputs must already satisfy; a failure
    /// here is a host bug, not a guest error.
    pub fn assemble(
        block: BlockInfo,
        message: MessageInfo,
        contract: ContractInfo,
        key: ContractKey,
    ) -> Result<Trusted<Env>, EncodingError> {
        if block.chain_id.is_empty() {
            return Err(EncodingError::EmptyChainId);
        }
        if message.signer.is_empty() {
            return Err(EncodingError::EmptyAddress { field: "signer" });
        }
        if contract.address.is_empty() {
            return Err(EncodingError::EmptyAddress { field: "contract" });
        }

        Ok(Trusted::new(Env {
            block,
            message,
            contract,
            key,
        }))
    }

    /// Guest side: read the environment the host passed in
    pub fn decode(bytes: &[u8]) -> Result<Env, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Get the contract's own address
    pub fn contract_address(&self) -> &CanonicalAddress {
        &self.contract.address
    }

    /// Check if any funds are attached to the current call
    pub fn has_sent_funds(&self) -> bool {
        self.message.sent_funds.iter().any(|c| !c.amount.is_zero())
    }
}

impl Trusted<Env> {
    /// Serialize for the guest. Field order is fixed by the struct layout,
    /// so equal environments always produce identical bytes.
    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        let bytes = serde_json::to_vec(&**self)?;
        debug!(
            "Encoded env for height {} on {} ({} bytes)",
            self.block.height,
            self.block.chain_id,
            bytes.len()
        );
        Ok(bytes)
    }
}

/// Assemble and serialize in one step
pub fn encode(
    block: BlockInfo,
    message: MessageInfo,
    contract: ContractInfo,
    key: ContractKey,
) -> Result<Vec<u8>, EncodingError> {
    Env::assemble(block, message, contract, key)?.encode()
}
