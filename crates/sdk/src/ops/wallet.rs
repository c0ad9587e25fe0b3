use std::future::Future;

use fandraft_evm_utils::{
    client_traits::{RpcClientExt, RpcSender},
    types::BlockId,
    Address, U256,
};

use crate::error::{WalletError, METHOD_NOT_FOUND, UNRECOGNIZED_CHAIN};

/// Wallet session operations.
pub trait WalletOps {
    /// Request account access, make sure the provider is on the configured
    /// chain and remember the first account.
    ///
    /// Providers without the wallet methods (plain nodes) fall back to
    /// `eth_accounts` and a chain id check.
    fn connect(&mut self) -> impl Future<Output = crate::Result<Address>>;

    /// Forget the connected account.
    fn disconnect(&mut self);

    /// Switch the provider to the configured chain, registering it first if
    /// the wallet does not know it.
    fn ensure_chain(&self) -> impl Future<Output = crate::Result<()>>;

    /// Fail with [`WalletError::WrongNetwork`] unless the provider reports
    /// the configured chain id.
    fn check_network(&self) -> impl Future<Output = crate::Result<u64>>;

    /// Native balance of `address`.
    fn balance(&self, address: &Address) -> impl Future<Output = crate::Result<U256>>;
}

impl<S: RpcSender> WalletOps for crate::Client<S> {
    async fn connect(&mut self) -> crate::Result<Address> {
        let accounts = match self.rpc().request_accounts().await {
            Ok(accounts) => accounts,
            Err(err) if err.rpc_code() == Some(METHOD_NOT_FOUND) => {
                tracing::debug!("`eth_requestAccounts` unsupported, using `eth_accounts`");
                self.rpc().accounts().await?
            }
            Err(err) => return Err(err.into()),
        };
        let account = accounts
            .first()
            .copied()
            .ok_or(WalletError::NotConnected)?;
        self.ensure_chain().await?;
        self.set_account(Some(account));
        tracing::info!(%account, chain = %self.chain(), "wallet connected");
        Ok(account)
    }

    fn disconnect(&mut self) {
        self.set_account(None);
    }

    async fn ensure_chain(&self) -> crate::Result<()> {
        let chain_id = self.chain().chain_id();
        match self.rpc().switch_chain(chain_id).await {
            Ok(()) => Ok(()),
            Err(err) if err.rpc_code() == Some(UNRECOGNIZED_CHAIN) => {
                tracing::info!(chain_id, "chain unknown to the wallet, adding it");
                let param = self.chain().params().to_add_chain_parameter();
                self.rpc().add_chain(&param).await?;
                Ok(())
            }
            Err(err) if err.rpc_code() == Some(METHOD_NOT_FOUND) => {
                self.check_network().await?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn check_network(&self) -> crate::Result<u64> {
        let expected = self.chain().chain_id();
        let found = self.rpc().chain_id().await?;
        if found != expected {
            return Err(WalletError::WrongNetwork { expected, found }.into());
        }
        Ok(found)
    }

    async fn balance(&self, address: &Address) -> crate::Result<U256> {
        Ok(self.rpc().get_balance(address, BlockId::Latest).await?)
    }
}
