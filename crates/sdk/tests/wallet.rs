mod common;

use common::{address, client, Ledger, MockLedger};
use fandraft_sdk::{
    evm_utils::{RpcRequest, U256},
    ops::WalletOps,
    Error, WalletError,
};

#[tokio::test]
async fn connect_adds_unknown_chain() -> eyre::Result<()> {
    let alice = address(0xa1);
    let ledger = MockLedger::new(Ledger {
        accounts: vec![alice, address(0xb0)],
        chain_known: false,
        ..Default::default()
    });
    let mut client = client(&ledger, None);

    assert_eq!(client.connect().await?, alice);
    assert_eq!(client.account(), Some(&alice));
    let requests = ledger.with(|l| l.requests.clone());
    assert_eq!(
        requests,
        [
            RpcRequest::RequestAccounts,
            RpcRequest::SwitchEthereumChain,
            RpcRequest::AddEthereumChain,
        ]
    );

    client.disconnect();
    assert!(client.account().is_none());
    Ok(())
}

#[tokio::test]
async fn connect_without_accounts_fails() -> eyre::Result<()> {
    let ledger = MockLedger::default();
    let mut client = client(&ledger, None);

    let err = client.connect().await.unwrap_err();
    assert!(matches!(err, Error::Wallet(WalletError::NotConnected)));
    assert!(client.account().is_none());
    Ok(())
}

#[tokio::test]
async fn node_endpoint_falls_back_to_chain_check() -> eyre::Result<()> {
    let alice = address(0xa1);
    let ledger = MockLedger::new(Ledger {
        accounts: vec![alice],
        wallet: false,
        ..Default::default()
    });
    let mut client = client(&ledger, None);
    assert_eq!(client.connect().await?, alice);

    ledger.with(|l| l.chain_id = 1);
    let mut client = common::client(&ledger, None);
    let err = client.connect().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Wallet(WalletError::WrongNetwork {
            expected: 88890,
            found: 1
        })
    ));
    Ok(())
}

#[tokio::test]
async fn balance_of_account() -> eyre::Result<()> {
    let ledger = MockLedger::default();
    let client = client(&ledger, None);
    let balance = client.balance(&address(0xa1)).await?;
    assert_eq!(balance, U256::from(1_000_000_000_000_000_000u128));
    Ok(())
}
