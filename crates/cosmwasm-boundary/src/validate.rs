//! Validation/Normalization layer
//!
//! Last check on guest output before anything reaches the ledger or the
//! message dispatcher. Amounts are already exact decimals at this point (the
//! decoder parses them); here we check denoms, addresses and the result's
//! free-form fields.

use std::collections::HashSet;

use tracing::warn;

use crate::address::AddressApi;
use crate::error::ValidationError;
use crate::msg::CosmosMsg;
use crate::response::ContractResult;
use crate::types::{CanonicalAddress, Coin, Verified};

const MAX_DENOM_LENGTH: usize = 128;

/// Validates a denom against the Cosmos SDK rule `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`
pub fn validate_denom(denom: &str) -> Result<(), ValidationError> {
    let mut chars = denom.chars();
    let first_ok = chars.next().map_or(false, |c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'));

    if !first_ok || !rest_ok || denom.len() < 3 || denom.len() > MAX_DENOM_LENGTH {
        return Err(ValidationError::InvalidDenom(denom.to_string()));
    }
    Ok(())
}

/// Checks guest output against the host's address scheme
pub struct Validator<'a> {
    api: &'a dyn AddressApi,
    contract: Option<&'a CanonicalAddress>,
}

impl<'a> Validator<'a> {
    pub fn new(api: &'a dyn AddressApi) -> Self {
        Self { api, contract: None }
    }

    /// Additionally require every `send` to originate from `contract`
    pub fn for_contract(api: &'a dyn AddressApi, contract: &'a CanonicalAddress) -> Self {
        Self {
            api,
            contract: Some(contract),
        }
    }

    pub fn check_result(&self, result: ContractResult) -> Result<Verified<ContractResult>, ValidationError> {
        for (index, msg) in result.messages.iter().enumerate() {
            self.check_message(msg).map_err(|e| {
                warn!("Message {} ({}) failed validation: {}", index, msg.kind(), e);
                e
            })?;
        }

        result.data_bytes()?;

        if let Some(index) = result.log.iter().position(|attr| attr.key.is_empty()) {
            return Err(ValidationError::EmptyLogKey(index));
        }

        Ok(Verified::new(result))
    }

    pub fn check_message(&self, msg: &CosmosMsg) -> Result<(), ValidationError> {
        match msg {
            CosmosMsg::Send(send) => {
                let from = self.check_address(&send.from_address)?;
                if let Some(contract) = self.contract {
                    if &from != contract {
                        return Err(ValidationError::UnauthorizedSender {
                            from: send.from_address.clone(),
                        });
                    }
                }
                self.check_address(&send.to_address)?;
                self.check_coins(&send.amount)
            }
            CosmosMsg::Contract(call) => {
                self.check_address(&call.contract_addr)?;
                self.check_coins(&call.send)
            }
            // Relayed verbatim, never interpreted
            CosmosMsg::Opaque(_) => Ok(()),
        }
    }

    pub fn check_coins(&self, coins: &[Coin]) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for coin in coins {
            validate_denom(&coin.denom)?;
            if !seen.insert(coin.denom.as_str()) {
                return Err(ValidationError::DuplicateDenom(coin.denom.clone()));
            }
        }
        Ok(())
    }

    pub fn check_address(&self, human: &str) -> Result<CanonicalAddress, ValidationError> {
        self.api.canonicalize(human)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Bech32AddressApi;
    use crate::msg::{ContractMsg, OpaqueMsg, SendMsg};
    use crate::response::LogAttribute;
    use crate::types::{coin, Binary};

    fn human(api: &Bech32AddressApi, byte: u8) -> String {
        api.humanize(&CanonicalAddress::from(vec![byte; 20])).unwrap()
    }

    fn send(api: &Bech32AddressApi, from: u8, to: u8, amount: Vec<Coin>) -> CosmosMsg {
        CosmosMsg::Send(SendMsg {
            from_address: human(api, from),
            to_address: human(api, to),
            amount,
        })
    }

    #[test]
    fn test_denom_rules() {
        for ok in ["uatom", "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2", "a.b_c-d:e"] {
            assert!(validate_denom(ok).is_ok(), "{ok}");
        }
        let too_long = "a".repeat(129);
        for bad in ["", "ab", "1atom", "u atom", "uatom!", too_long.as_str()] {
            assert!(validate_denom(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_valid_result_is_verified() {
        let api = Bech32AddressApi::default();
        let result = ContractResult::new()
            .add_message(send(&api, 1, 2, vec![coin(5, "uatom")]))
            .add_message(ContractMsg {
                contract_addr: human(&api, 3),
                msg: Binary::from(b"anything, not inspected".to_vec()),
                send: vec![],
            })
            .add_message(OpaqueMsg {
                data: Binary::from(vec![0xff]),
            })
            .add_attribute("action", "pay");

        let verified = Validator::new(&api).check_result(result.clone()).unwrap();
        assert_eq!(*verified, result);
    }

    #[test]
    fn test_bad_address_rejected() {
        let api = Bech32AddressApi::default();
        let msg = CosmosMsg::Send(SendMsg {
            from_address: human(&api, 1),
            to_address: "cosmos1notvalid".to_string(),
            amount: vec![],
        });
        let err = Validator::new(&api).check_message(&msg).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAddress { .. }));
    }

    #[test]
    fn test_foreign_sender_rejected() {
        let api = Bech32AddressApi::default();
        let contract = CanonicalAddress::from(vec![1u8; 20]);
        let validator = Validator::for_contract(&api, &contract);

        assert!(validator.check_message(&send(&api, 1, 2, vec![])).is_ok());

        let err = validator.check_message(&send(&api, 9, 2, vec![])).unwrap_err();
        assert!(matches!(err, ValidationError::UnauthorizedSender { .. }));
    }

    #[test]
    fn test_duplicate_and_bad_denoms() {
        let api = Bech32AddressApi::default();
        let validator = Validator::new(&api);

        let err = validator
            .check_coins(&[coin(1, "uatom"), coin(2, "uatom")])
            .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateDenom("uatom".to_string()));

        let err = validator.check_coins(&[coin(1, "")]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDenom(_)));
    }

    #[test]
    fn test_short_denom_decodes_but_fails_validation() {
        let api = Bech32AddressApi::default();
        let raw = format!(
            r#"{{"contract":{{"contract_addr":"{}","msg":"","send":[{{"denom":"ab","amount":"1"}}]}}}}"#,
            human(&api, 3)
        );

        let msg = CosmosMsg::decode(raw.as_bytes()).unwrap();
        let err = Validator::new(&api).check_message(&msg).unwrap_err();
        assert_eq!(err, ValidationError::InvalidDenom("ab".to_string()));
    }

    #[test]
    fn test_bad_data_and_log_rejected() {
        let api = Bech32AddressApi::default();
        let validator = Validator::new(&api);

        let mut result = ContractResult::new();
        result.data = "%%%".to_string();
        assert!(matches!(
            validator.check_result(result).unwrap_err(),
            ValidationError::InvalidData(_)
        ));

        let mut result = ContractResult::new();
        result.log = vec![LogAttribute::new("a", "1"), LogAttribute::new("", "2")];
        assert_eq!(
            validator.check_result(result).unwrap_err(),
            ValidationError::EmptyLogKey(1)
        );
    }
}
