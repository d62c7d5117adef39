// Error taxonomy for both directions of the host/guest boundary

use thiserror::Error;

/// Errors raised while the host assembles or serializes an [`Env`](crate::env::Env).
///
/// These indicate a host-side bug: the inputs come from consensus-validated
/// chain state and should never be malformed.
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Chain id must not be empty")]
    EmptyChainId,

    #[error("{field} address must not be empty")]
    EmptyAddress { field: &'static str },

    #[error("{field} address is {actual} bytes, expected {expected}")]
    InvalidAddressLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Error envelope must carry a non-empty message")]
    EmptyError,

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while parsing bytes returned by the guest.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Envelope has neither ok nor err set")]
    EmptyEnvelope,

    #[error("Envelope has both ok and err set")]
    AmbiguousEnvelope,

    #[error("Message must set exactly one of send, contract, opaque (found {found})")]
    InvalidVariantCount { found: usize },

    #[error("Payload is {size} bytes, limit is {limit}")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Response carries {count} messages, limit is {limit}")]
    TooManyMessages { count: usize, limit: usize },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Errors raised by the validation layer on guest-originated values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid amount {amount:?}: {reason}")]
    InvalidAmount { amount: String, reason: &'static str },

    #[error("Invalid denom {0:?}")]
    InvalidDenom(String),

    #[error("Duplicate denom {0:?} in coin list")]
    DuplicateDenom(String),

    #[error("Invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Canonical address is {actual} bytes, expected {expected}")]
    InvalidAddressLength { expected: usize, actual: usize },

    #[error("Send from {from} is not authorized by the executing contract")]
    UnauthorizedSender { from: String },

    #[error("Result data is not valid base64: {0}")]
    InvalidData(String),

    #[error("Log attribute {0} has an empty key")]
    EmptyLogKey(usize),
}

/// Everything the host pipeline can report back to the invocation layer.
///
/// Every variant means "this contract call failed"; nothing here is retried.
#[derive(Error, Debug)]
pub enum BoundaryError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Contract returned error: {0}")]
    ContractFailed(String),

    #[error("Dispatch of message {index} failed: {reason}")]
    Dispatch { index: usize, reason: String },
}

pub type BoundaryResult<T> = Result<T, BoundaryError>;
