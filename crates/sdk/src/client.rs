use fandraft_evm_utils::{
    client_traits::{
        ConfirmationConfig, GenericRpcClient, GenericRpcClientConfig, RpcClientExt, RpcSender,
    },
    types::{BlockId, CallRequest, TransactionRequest},
    Address, Bytes, Chain, TxHash, U256,
};
use typed_builder::TypedBuilder;

#[cfg(feature = "http-rpc-sender")]
use fandraft_evm_utils::client_traits::HttpRpcSender;

use crate::{
    cache::DraftCache,
    contract::{DraftContract, ResolutionAbi},
    error::WalletError,
};

/// Options for [`Client`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ClientOptions {
    /// Resolution ABI of the deployment.
    #[builder(default)]
    resolution: ResolutionAbi,
    /// Chain the wallet must be connected to.
    #[builder(default)]
    chain: Chain,
    /// Signing account, if already known.
    #[builder(default, setter(into))]
    account: Option<Address>,
    /// Transaction confirmation options.
    #[builder(default)]
    confirmation: ConfirmationConfig,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// FanDraft client.
///
/// Reads go through `eth_call` against the draft contract. Mutations are
/// submitted with `eth_sendTransaction`, leaving signing to the wallet or
/// node behind the endpoint.
pub struct Client<S> {
    rpc: GenericRpcClient<S>,
    contract: DraftContract,
    chain: Chain,
    account: Option<Address>,
    cache: DraftCache,
}

impl<S> std::fmt::Debug for Client<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("contract", &self.contract)
            .field("chain", &self.chain)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "http-rpc-sender")]
impl Client<HttpRpcSender> {
    /// Create a client talking to the chain's RPC endpoint.
    pub fn new_with_options(contract: Address, options: ClientOptions) -> Self {
        let url = options.chain.url();
        Self::new_with_sender(HttpRpcSender::new(url), contract, options)
    }
}

impl<S: RpcSender> Client<S> {
    /// Create a client with the given transport.
    pub fn new_with_sender(sender: S, contract: Address, options: ClientOptions) -> Self {
        let ClientOptions {
            resolution,
            chain,
            account,
            confirmation,
        } = options;
        Self {
            rpc: GenericRpcClient::new_with_sender_and_config(
                sender,
                GenericRpcClientConfig { confirmation },
            ),
            contract: DraftContract::new(contract, resolution),
            chain,
            account,
            cache: DraftCache::default(),
        }
    }

    /// Get the RPC client.
    pub fn rpc(&self) -> &GenericRpcClient<S> {
        &self.rpc
    }

    /// Get the contract bindings.
    pub fn contract(&self) -> &DraftContract {
        &self.contract
    }

    /// Get the configured chain.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Get the draft cache.
    pub fn cache(&self) -> &DraftCache {
        &self.cache
    }

    /// The connected account, if any.
    pub fn account(&self) -> Option<&Address> {
        self.account.as_ref()
    }

    /// The connected account, or [`WalletError::NotConnected`].
    pub fn require_account(&self) -> crate::Result<Address> {
        self.account
            .ok_or_else(|| WalletError::NotConnected.into())
    }

    /// Replace the connected account.
    pub fn set_account(&mut self, account: Option<Address>) {
        self.account = account;
    }

    /// Execute a read-only call against the contract.
    pub(crate) async fn call(&self, data: Bytes) -> crate::Result<Bytes> {
        let request = CallRequest {
            from: self.account,
            to: *self.contract.address(),
            input: data,
        };
        Ok(self.rpc.call(&request, BlockId::Latest).await?)
    }

    /// Submit a transaction to the contract and wait for its receipt.
    ///
    /// A reverted receipt is returned as [`Error::Reverted`](crate::Error::Reverted).
    /// On success the draft cache is invalidated.
    pub(crate) async fn submit(
        &self,
        action: &str,
        data: Bytes,
        value: Option<U256>,
    ) -> crate::Result<TxHash> {
        let from = self.require_account()?;
        let request = TransactionRequest {
            from,
            to: *self.contract.address(),
            data,
            value,
        };
        let hash = self.rpc.send_transaction(&request).await?;
        tracing::info!(%hash, %from, "{action}: transaction submitted");
        let receipt = self.rpc.wait_for_receipt(&hash).await?;
        if receipt.is_reverted() {
            return Err(crate::Error::Reverted(hash));
        }
        tracing::info!(%hash, block = ?receipt.block_number, "{action}: confirmed");
        self.cache.invalidate().await;
        Ok(hash)
    }
}

/// Current unix time in seconds.
pub fn now_unix() -> u64 {
    u64::try_from(time::OffsetDateTime::now_utc().unix_timestamp()).unwrap_or_default()
}
