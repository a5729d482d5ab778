//! Integration tests for the Authority Resolver fallback chain

mod common;

use common::*;
use rug_hunter::utils::decoder::MetadataHeader;
use rug_hunter::utils::pubkey::{Pubkey, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};
use rug_hunter::utils::MintInfo;
use rug_hunter::{AuthorityResolver, AuthorityType, ErrorCode, ErrorKind, LedgerError};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_metadata_update_authority_wins_without_mint_fetch() {
    let mint = test_key(1);
    let update_authority = test_key(2);
    let mint_authority = test_key(3);
    let ledger = Arc::new(
        MockLedger::new()
            .with_metadata(mint, Some(update_authority))
            .with_mint(mint, Some(mint_authority)),
    );
    let resolver = resolver_over(ledger.clone());

    let record = resolver.resolve(&mint.to_string()).await.unwrap();

    assert_eq!(record.mint_address, mint);
    assert_eq!(record.authority_type, AuthorityType::UpdateAuthority);
    assert_eq!(record.authority, Some(update_authority));
    assert_eq!(ledger.calls(), 1, "mint account must not be fetched");
    assert_eq!(
        ledger.fetched(),
        vec![AuthorityResolver::metadata_address(&mint).unwrap()]
    );
}

#[tokio::test]
async fn test_falls_back_to_mint_authority_without_metadata() {
    let mint = test_key(1);
    let mint_authority = test_key(3);
    let ledger = Arc::new(MockLedger::new().with_mint(mint, Some(mint_authority)));
    let resolver = resolver_over(ledger.clone());

    let record = resolver.resolve(&mint.to_string()).await.unwrap();

    assert_eq!(record.authority_type, AuthorityType::MintAuthority);
    assert_eq!(record.authority, Some(mint_authority));
    assert_eq!(ledger.calls(), 2);
    assert_eq!(
        ledger.fetched(),
        vec![AuthorityResolver::metadata_address(&mint).unwrap(), mint]
    );
}

#[tokio::test]
async fn test_metadata_without_update_authority_falls_through() {
    let mint = test_key(1);
    let mint_authority = test_key(3);
    let ledger = Arc::new(
        MockLedger::new()
            .with_metadata(mint, None)
            .with_mint(mint, Some(mint_authority)),
    );

    let record = resolver_over(ledger.clone())
        .resolve(&mint.to_string())
        .await
        .unwrap();

    assert_eq!(record.authority_type, AuthorityType::MintAuthority);
    assert_eq!(record.authority, Some(mint_authority));
    assert_eq!(ledger.calls(), 2);
}

#[tokio::test]
async fn test_undecodable_metadata_falls_through() {
    let mint = test_key(1);
    let mint_authority = test_key(3);
    let ledger = Arc::new(
        MockLedger::new()
            .with_metadata_bytes(mint, vec![0u8; 10])
            .with_mint(mint, Some(mint_authority)),
    );

    let record = resolver_over(ledger).resolve(&mint.to_string()).await.unwrap();
    assert_eq!(record.authority_type, AuthorityType::MintAuthority);
    assert_eq!(record.authority, Some(mint_authority));
}

#[tokio::test]
async fn test_metadata_for_another_mint_falls_through() {
    let mint = test_key(1);
    let foreign = MetadataHeader {
        update_authority: Some(test_key(2)),
        mint: test_key(4),
    }
    .encode();
    let ledger = Arc::new(
        MockLedger::new()
            .with_metadata_bytes(mint, foreign)
            .with_mint(mint, Some(test_key(3))),
    );

    let record = resolver_over(ledger).resolve(&mint.to_string()).await.unwrap();
    assert_eq!(record.authority_type, AuthorityType::MintAuthority);
    assert_eq!(record.authority, Some(test_key(3)));
}

#[tokio::test]
async fn test_revoked_mint_authority_is_valid_outcome() {
    let mint = test_key(1);
    let ledger = Arc::new(MockLedger::new().with_mint(mint, None));

    let record = resolver_over(ledger).resolve(&mint.to_string()).await.unwrap();
    assert_eq!(record.authority_type, AuthorityType::MintAuthority);
    assert_eq!(record.authority, None);
}

#[tokio::test]
async fn test_token_2022_mint_is_accepted() {
    let mint = test_key(1);
    let data = MintInfo {
        mint_authority: Some(test_key(5)),
        supply: 42,
        decimals: 9,
        is_initialized: true,
        freeze_authority: None,
    }
    .encode();
    let ledger = Arc::new(MockLedger::new().with_account(mint, TOKEN_2022_PROGRAM_ID, data));

    let record = resolver_over(ledger).resolve(&mint.to_string()).await.unwrap();
    assert_eq!(record.authority, Some(test_key(5)));
}

#[test]
fn test_metadata_address_of_known_mint() {
    let usdc: Pubkey = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".parse().unwrap();
    let pda = AuthorityResolver::metadata_address(&usdc).unwrap();
    assert_eq!(pda.to_string(), "5x38Kp4hvdomTCnCrAny4UtMUt5rQBdB6px2K1Ui45Wq");
}

// ============================================
// Failures
// ============================================

#[tokio::test]
async fn test_invalid_input_makes_no_network_calls() {
    let ledger = Arc::new(MockLedger::new());
    let resolver = resolver_over(ledger.clone());

    for bad in ["not-a-valid-address", "", "   ", "3k7f"] {
        let err = resolver.resolve(bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "input {bad:?}");
    }
    assert_eq!(ledger.calls(), 0);
}

#[tokio::test]
async fn test_missing_mint_is_not_found() {
    let mint = test_key(1);
    let ledger = Arc::new(MockLedger::new());

    let err = resolver_over(ledger.clone())
        .resolve(&mint.to_string())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.code.http_status(), 404);
    assert_eq!(ledger.calls(), 2);
}

#[tokio::test]
async fn test_non_token_account_is_resolution_error() {
    let mint = test_key(1);
    let system_program = Pubkey::default();
    let ledger = Arc::new(MockLedger::new().with_account(mint, system_program, vec![0u8; 82]));

    let err = resolver_over(ledger).resolve(&mint.to_string()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResolutionFailed);
    assert!(!err.code.is_retryable(), "a foreign owner will not change on retry");
}

#[tokio::test]
async fn test_malformed_mint_is_resolution_error() {
    let mint = test_key(1);
    let ledger = Arc::new(MockLedger::new().with_account(mint, TOKEN_PROGRAM_ID, vec![1, 2, 3]));

    let err = resolver_over(ledger).resolve(&mint.to_string()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResolutionError);
    assert!(!err.is_timeout());
    assert!(!err.code.is_retryable());
}

#[tokio::test]
async fn test_rpc_error_is_not_retryable() {
    let mint = test_key(1);
    let ledger = Arc::new(MockLedger::new().failing(LedgerError::Rpc {
        code: -32602,
        message: "Invalid param: WrongSize".into(),
    }));

    let err = resolver_over(ledger).resolve(&mint.to_string()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResolutionFailed);
    assert_eq!(err.code_str(), "RESOLUTION_ERROR");
    assert!(!err.code.is_retryable());
}

#[tokio::test]
async fn test_network_failure_is_resolution_error() {
    let mint = test_key(1);
    let ledger = Arc::new(
        MockLedger::new()
            .with_mint(mint, Some(test_key(3)))
            .failing(LedgerError::Transport("connection refused".into())),
    );

    let err = resolver_over(ledger.clone())
        .resolve(&mint.to_string())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResolutionTransport);
    assert_eq!(err.kind(), ErrorKind::ResolutionError);
    assert!(err.code.is_retryable());
    assert!(err.message.contains("connection refused"));
    // Network failures are not a reason to fall back
    assert_eq!(ledger.calls(), 1);
}

#[tokio::test]
async fn test_slow_fetch_times_out_distinguishably() {
    let mint = test_key(1);
    let ledger = Arc::new(
        MockLedger::new()
            .with_mint(mint, Some(test_key(3)))
            .with_delay(Duration::from_millis(500)),
    );
    let resolver = resolver_over(ledger);

    let err = resolver
        .resolve_with_timeout(&mint.to_string(), Duration::from_millis(20))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.kind(), ErrorKind::ResolutionError);
    assert_eq!(err.code.http_status(), 504);
}

#[tokio::test]
async fn test_ledger_timeout_maps_to_timeout() {
    let mint = test_key(1);
    let ledger = Arc::new(MockLedger::new().failing(LedgerError::Timeout(Duration::from_secs(1))));

    let err = resolver_over(ledger).resolve(&mint.to_string()).await.unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_record_serialization_shape() {
    let mint = test_key(1);
    let ledger = Arc::new(MockLedger::new().with_metadata(mint, Some(test_key(2))));

    let record = resolver_over(ledger).resolve(&mint.to_string()).await.unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["mintAddress"], mint.to_string());
    assert_eq!(json["authorityType"], "updateAuthority");
    assert_eq!(json["authority"], test_key(2).to_string());
}
