// End-to-end scenarios for the host/guest boundary encoding
use pretty_assertions::assert_eq;

use cosmwasm_boundary::{
    coin, env, Binary, BlockInfo, CanonicalAddress, Coin, ContractInfo, ContractKey, ContractMsg,
    ContractResult, CosmosMsg, CosmosResponse, DecodeError, Decimal, Env, MessageInfo, OpaqueMsg,
    QueryResponse, SendMsg, ValidationError,
};

fn signer() -> CanonicalAddress {
    let mut bytes = vec![0u8; 20];
    bytes[0] = 0x01;
    bytes[19] = 0x02;
    CanonicalAddress::from(bytes)
}

fn sample_messages() -> Vec<CosmosMsg> {
    vec![
        CosmosMsg::Send(SendMsg {
            from_address: "cosmos1a".to_string(),
            to_address: "cosmos1b".to_string(),
            amount: vec![coin(1, "uatom")],
        }),
        CosmosMsg::Contract(ContractMsg {
            contract_addr: "cosmos1c".to_string(),
            msg: Binary::from(br#"{"ping":{}}"#.to_vec()),
            send: vec![],
        }),
        CosmosMsg::Opaque(OpaqueMsg {
            data: Binary::from(vec![9, 9, 9]),
        }),
    ]
}

/// Full environment round trip with the reference values
#[test]
fn test_environment_round_trip() {
    let block = BlockInfo {
        height: 100,
        time: 1_600_000_000,
        chain_id: "testchain".to_string(),
    };
    let message = MessageInfo {
        signer: signer(),
        sent_funds: vec![Coin::parse("uatom", "500").unwrap()],
    };
    let contract = ContractInfo {
        address: CanonicalAddress::from(vec![0x42; 20]),
        balance: vec![coin(1_000_000_000_000, "uatom")],
    };
    let key = ContractKey::from("ns");

    let bytes = env::encode(block.clone(), message.clone(), contract.clone(), key.clone()).unwrap();
    let decoded = Env::decode(&bytes).unwrap();

    assert_eq!(
        decoded,
        Env {
            block,
            message,
            contract,
            key
        }
    );
}

/// Every single-variant message survives encode then decode
#[test]
fn test_message_round_trip() {
    for msg in sample_messages() {
        let decoded = CosmosMsg::decode(&msg.encode().unwrap()).unwrap();
        assert_eq!(decoded, msg);
    }
}

/// Zero or several variants never decode, and no variant is silently picked
#[test]
fn test_variant_count_enforced() {
    let cases = [
        (r#"{}"#, 0),
        (r#"{"send":null,"contract":null,"opaque":null}"#, 0),
        (r#"{"send":{},"contract":{}}"#, 2),
        (r#"{"contract":{},"opaque":{}}"#, 2),
        (r#"{"send":{},"opaque":{}}"#, 2),
        (r#"{"send":{},"contract":{},"opaque":{}}"#, 3),
    ];

    for (raw, expected) in cases {
        match CosmosMsg::decode(raw.as_bytes()) {
            Err(DecodeError::InvalidVariantCount { found }) => assert_eq!(found, expected, "{raw}"),
            other => panic!("{raw}: expected InvalidVariantCount, got {other:?}"),
        }
    }
}

#[test]
fn test_envelopes_with_both_arms_rejected() {
    let response = r#"{"ok":{"gas_used":5,"messages":[],"data":"","log":[]},"err":"failed"}"#;
    assert!(matches!(
        CosmosResponse::decode(response.as_bytes()),
        Err(DecodeError::AmbiguousEnvelope)
    ));

    let query = r#"{"ok":"aGk=","err":"failed"}"#;
    assert!(matches!(
        QueryResponse::decode(query.as_bytes()),
        Err(DecodeError::AmbiguousEnvelope)
    ));
}

#[test]
fn test_envelopes_with_no_arm_rejected() {
    for raw in [r#"{}"#, r#"{"ok":null,"err":""}"#] {
        assert!(matches!(
            CosmosResponse::decode(raw.as_bytes()),
            Err(DecodeError::EmptyEnvelope)
        ));
        assert!(matches!(
            QueryResponse::decode(raw.as_bytes()),
            Err(DecodeError::EmptyEnvelope)
        ));
    }
}

#[test]
fn test_amount_parsing() {
    for ok in ["12.3456", "0", "1000000000000"] {
        let amount: Decimal = ok.parse().unwrap();
        assert_eq!(amount.to_string(), ok);
    }
    for bad in ["-1", "abc", ""] {
        assert!(matches!(
            bad.parse::<Decimal>(),
            Err(ValidationError::InvalidAmount { .. })
        ));
    }
}

/// Dispatch order is encounter order
#[test]
fn test_message_order_preserved() {
    let messages = sample_messages();
    let result = messages
        .iter()
        .cloned()
        .fold(ContractResult::new(), |result, msg| result.add_message(msg));

    let bytes = CosmosResponse::Ok(result).encode().unwrap();
    let decoded = CosmosResponse::decode(&bytes).unwrap().into_result().unwrap();

    assert_eq!(decoded.messages, messages);
}

/// Guest output in the exact shape a Go host produces
#[test]
fn test_guest_response_with_two_messages() {
    let raw = r#"{"ok":{"gas_used":0,"messages":[{"send":{"from_address":"cosmos1a","to_address":"cosmos1b","amount":[{"denom":"uatom","amount":"1"}]}},{"contract":{"contract_addr":"cosmos1c","msg":"eyJwaW5nIjp7fX0=","send":[]}}],"data":"","log":[]},"err":""}"#;

    let result = CosmosResponse::decode(raw.as_bytes())
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(result.gas_used, 0);
    assert_eq!(result.messages, sample_messages()[..2].to_vec());
}
