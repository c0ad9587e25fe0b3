//! RPC client traits.

use std::{
    future::Future,
    time::{Duration, Instant},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::{
    chain::AddEthereumChainParameter,
    types::{
        parse_quantity, BlockId, Bytes, CallRequest, Log, LogFilter, TransactionReceipt,
        TransactionRequest,
    },
    Address, RpcRequest, TxHash, U256,
};

pub mod generic;

/// Options for waiting on transaction confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmationConfig {
    /// Interval between receipt polls.
    pub poll_interval: Duration,
    /// Give up after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            timeout: None,
        }
    }
}

/// A RPC client.
pub trait RpcClient {
    /// Returns the confirmation options.
    fn confirmation(&self) -> &ConfirmationConfig;

    /// Send an [`RpcRequest`] with parameters.
    fn send<T>(
        &self,
        request: RpcRequest,
        params: impl Serialize,
    ) -> impl Future<Output = crate::Result<T>>
    where
        T: DeserializeOwned;
}

fn quantity_to_u64(value: &str) -> crate::Result<u64> {
    let quantity = parse_quantity(value)?;
    u64::try_from(quantity).map_err(|_| crate::Error::InvalidQuantity(value.to_string()))
}

/// A trait that extends [`RpcClient`] with ledger and wallet methods.
pub trait RpcClientExt: RpcClient {
    /// Get the chain id of the connected node.
    fn chain_id(&self) -> impl Future<Output = crate::Result<u64>> {
        async move {
            let id = self.send::<String>(RpcRequest::ChainId, json!([])).await?;
            quantity_to_u64(&id)
        }
    }

    /// Get the latest block number.
    fn block_number(&self) -> impl Future<Output = crate::Result<u64>> {
        async move {
            let number = self
                .send::<String>(RpcRequest::BlockNumber, json!([]))
                .await?;
            quantity_to_u64(&number)
        }
    }

    /// Execute a read-only call.
    fn call(
        &self,
        request: &CallRequest,
        block: BlockId,
    ) -> impl Future<Output = crate::Result<Bytes>> {
        let params = json!([request, block]);
        tracing::trace!(to = %request.to, "eth_call");
        async move { self.send::<Bytes>(RpcRequest::Call, params).await }
    }

    /// Get the native balance of `address`.
    fn get_balance(
        &self,
        address: &Address,
        block: BlockId,
    ) -> impl Future<Output = crate::Result<U256>> {
        let params = json!([address, block]);
        async move {
            let balance = self.send::<String>(RpcRequest::GetBalance, params).await?;
            parse_quantity(&balance)
        }
    }

    /// Submit a transaction to be signed by the connected account.
    fn send_transaction(
        &self,
        request: &TransactionRequest,
    ) -> impl Future<Output = crate::Result<TxHash>> {
        let params = json!([request]);
        tracing::debug!(from = %request.from, to = %request.to, "sending transaction");
        async move { self.send::<TxHash>(RpcRequest::SendTransaction, params).await }
    }

    /// Get the receipt of a transaction, `None` if it is still pending.
    fn get_transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> impl Future<Output = crate::Result<Option<TransactionReceipt>>> {
        let params = json!([hash]);
        async move {
            self.send::<Option<TransactionReceipt>>(RpcRequest::GetTransactionReceipt, params)
                .await
        }
    }

    /// Poll for the receipt of a transaction until it is mined.
    ///
    /// Returns [`Error::ConfirmationTimeout`](crate::Error::ConfirmationTimeout) if the
    /// configured timeout elapses first. Reverted receipts are returned as is.
    fn wait_for_receipt(
        &self,
        hash: &TxHash,
    ) -> impl Future<Output = crate::Result<TransactionReceipt>> {
        let hash = *hash;
        async move {
            let started = Instant::now();
            let config = self.confirmation().clone();
            loop {
                if let Some(receipt) = self.get_transaction_receipt(&hash).await? {
                    tracing::debug!(%hash, status = ?receipt.status, "transaction mined");
                    return Ok(receipt);
                }
                if let Some(timeout) = config.timeout {
                    if started.elapsed() >= timeout {
                        return Err(crate::Error::ConfirmationTimeout(hash));
                    }
                }
                tokio::time::sleep(config.poll_interval).await;
            }
        }
    }

    /// Get logs matching the filter.
    fn get_logs(&self, filter: &LogFilter) -> impl Future<Output = crate::Result<Vec<Log>>> {
        let params = json!([filter]);
        async move { self.send::<Vec<Log>>(RpcRequest::GetLogs, params).await }
    }

    /// List the accounts already exposed by the provider.
    fn accounts(&self) -> impl Future<Output = crate::Result<Vec<Address>>> {
        async move { self.send::<Vec<Address>>(RpcRequest::Accounts, json!([])).await }
    }

    /// Ask the provider for account access.
    fn request_accounts(&self) -> impl Future<Output = crate::Result<Vec<Address>>> {
        async move {
            self.send::<Vec<Address>>(RpcRequest::RequestAccounts, json!([]))
                .await
        }
    }

    /// Ask the provider to switch to the given chain.
    fn switch_chain(&self, chain_id: u64) -> impl Future<Output = crate::Result<()>> {
        let params = json!([{ "chainId": format!("0x{chain_id:x}") }]);
        async move {
            self.send::<Value>(RpcRequest::SwitchEthereumChain, params)
                .await?;
            Ok(())
        }
    }

    /// Ask the provider to register a chain.
    fn add_chain(
        &self,
        param: &AddEthereumChainParameter,
    ) -> impl Future<Output = crate::Result<()>> {
        let params = json!([param]);
        async move {
            self.send::<Value>(RpcRequest::AddEthereumChain, params)
                .await?;
            Ok(())
        }
    }
}

impl<C: RpcClient> RpcClientExt for C {}
