// CosmWasm Boundary Library
// Data model and validation for everything that crosses the host/guest memory
// boundary of a contract call: the trusted environment going in, and the
// untrusted response or query result coming back.

pub mod address;
pub mod config;
pub mod env;
pub mod error;
pub mod host;
pub mod msg;
pub mod query;
pub mod response;
pub mod types;
pub mod validate;

mod wire;

// Re-export commonly used types for convenience
pub use address::{AddressApi, Bech32AddressApi};
pub use config::{AddressConfig, BoundaryConfig, ConfigError, LimitsConfig};
pub use env::{BlockInfo, ContractInfo, ContractKey, Env, MessageInfo};
pub use error::{BoundaryError, BoundaryResult, DecodeError, EncodingError, ValidationError};
pub use host::{EventSink, FixedGas, GasMeter, HostBoundary, MessageDispatcher};
pub use msg::{ContractMsg, CosmosMsg, OpaqueMsg, SendMsg};
pub use query::QueryResponse;
pub use response::{ContractResult, CosmosResponse, LogAttribute};
pub use types::{coin, Binary, CanonicalAddress, Coin, Decimal, Trusted, Verified};
pub use validate::Validator;
