// Host-side pipeline: environment out, verified responses in.
//
// This is the only place that makes trust decisions. Guest bytes go through
// size limits, structural decoding and validation before any collaborator
// (gas meter, dispatcher, event sink) sees them.

use tracing::{debug, info, warn};

use crate::address::{AddressApi, Bech32AddressApi};
use crate::config::{BoundaryConfig, ConfigError};
use crate::env::{BlockInfo, ContractInfo, ContractKey, Env, MessageInfo};
use crate::error::{BoundaryError, BoundaryResult, DecodeError, EncodingError};
use crate::msg::CosmosMsg;
use crate::query::QueryResponse;
use crate::response::{ContractResult, CosmosResponse, LogAttribute};
use crate::types::{Binary, Trusted, Verified};
use crate::validate::Validator;

/// Gas metering service: the authoritative amount of gas a call consumed
pub trait GasMeter {
    fn gas_used(&self) -> u64;
}

/// Message dispatch service performing the actual ledger and cross-contract effects
pub trait MessageDispatcher {
    /// Called once per message, in the order the contract returned them
    fn dispatch(&mut self, index: usize, msg: &CosmosMsg) -> Result<(), String>;
}

/// Logging sink turning log attributes into ABCI events
pub trait EventSink {
    fn emit(&mut self, attributes: &[LogAttribute]);
}

/// Fixed gas reading, for callers that metered the call elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedGas(pub u64);

impl GasMeter for FixedGas {
    fn gas_used(&self) -> u64 {
        self.0
    }
}

/// Host end of the boundary, parameterized by the chain's address scheme
pub struct HostBoundary<A: AddressApi = Bech32AddressApi> {
    config: BoundaryConfig,
    api: A,
}

impl HostBoundary<Bech32AddressApi> {
    pub fn from_config(config: BoundaryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let api = Bech32AddressApi::from_config(&config.address);
        Ok(Self { config, api })
    }
}

impl<A: AddressApi> HostBoundary<A> {
    pub fn new(config: BoundaryConfig, api: A) -> Self {
        Self { config, api }
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Assemble the environment, also checking canonical address lengths
    /// against the configured scheme
    pub fn assemble_env(
        &self,
        block: BlockInfo,
        message: MessageInfo,
        contract: ContractInfo,
        key: ContractKey,
    ) -> Result<Trusted<Env>, EncodingError> {
        let expected = self.config.address.canonical_length;
        for (field, actual) in [
            ("signer", message.signer.len()),
            ("contract", contract.address.len()),
        ] {
            if actual != 0 && actual != expected {
                return Err(EncodingError::InvalidAddressLength {
                    field,
                    expected,
                    actual,
                });
            }
        }
        Env::assemble(block, message, contract, key)
    }

    pub fn encode_env(&self, env: &Trusted<Env>) -> Result<Vec<u8>, EncodingError> {
        env.encode()
    }

    /// Decode and verify the guest's answer to `init` / `handle`.
    ///
    /// The guest's `gas_used` is replaced by the meter's reading. A guest
    /// `err` surfaces as [`BoundaryError::ContractFailed`].
    pub fn decode_execute(
        &self,
        env: &Trusted<Env>,
        bytes: Vec<u8>,
        meter: &dyn GasMeter,
    ) -> BoundaryResult<Verified<ContractResult>> {
        self.check_size(&bytes)?;

        let mut result = match CosmosResponse::decode(&bytes)? {
            CosmosResponse::Ok(result) => result,
            CosmosResponse::Err(err) => {
                warn!("Contract returned error: {}", err);
                return Err(BoundaryError::ContractFailed(err));
            }
        };

        let limit = self.config.limits.max_messages;
        if result.messages.len() > limit {
            warn!("Rejecting result with {} messages (limit {})", result.messages.len(), limit);
            return Err(DecodeError::TooManyMessages {
                count: result.messages.len(),
                limit,
            }
            .into());
        }

        let metered = meter.gas_used();
        if result.gas_used != metered {
            debug!("Overriding guest gas_used {} with metered {}", result.gas_used, metered);
        }
        result.gas_used = metered;

        let validator = Validator::for_contract(&self.api, env.contract_address());
        let verified = validator.check_result(result)?;

        info!(
            "Accepted contract result: {} messages, {} log attributes, gas {}",
            verified.messages.len(),
            verified.log.len(),
            verified.gas_used
        );
        Ok(verified)
    }

    /// Decode the guest's answer to a query
    pub fn decode_query(&self, bytes: Vec<u8>) -> BoundaryResult<Binary> {
        self.check_size(&bytes)?;

        match QueryResponse::decode(&bytes)? {
            QueryResponse::Ok(data) => Ok(data),
            QueryResponse::Err(err) => {
                warn!("Query returned error: {}", err);
                Err(BoundaryError::ContractFailed(err))
            }
        }
    }

    /// Hand a verified result to the collaborators.
    ///
    /// Messages go out in order and dispatch stops at the first failure;
    /// rolling back earlier effects is the caller's decision. Log attributes
    /// are emitted only once every message succeeded. Returns the result's
    /// `data` for the caller.
    pub fn dispatch(
        &self,
        result: Verified<ContractResult>,
        dispatcher: &mut dyn MessageDispatcher,
        sink: &mut dyn EventSink,
    ) -> BoundaryResult<String> {
        for (index, msg) in result.messages.iter().enumerate() {
            dispatcher.dispatch(index, msg).map_err(|reason| {
                warn!("Dispatch of message {} ({}) failed: {}", index, msg.kind(), reason);
                BoundaryError::Dispatch { index, reason }
            })?;
        }

        sink.emit(&result.log);
        Ok(result.into_inner().data)
    }

    fn check_size(&self, bytes: &[u8]) -> Result<(), DecodeError> {
        let limit = self.config.limits.max_response_bytes;
        if bytes.len() > limit {
            warn!("Rejecting {} byte guest payload (limit {})", bytes.len(), limit);
            return Err(DecodeError::PayloadTooLarge {
                size: bytes.len(),
                limit,
            });
        }
        Ok(())
    }
}
