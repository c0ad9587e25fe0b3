//! Generic RPC client implementation.

use serde::{de::DeserializeOwned, Serialize};

use crate::{client_traits::RpcSender, RpcRequest};

use super::{ConfirmationConfig, RpcClient};

#[cfg(http_rpc_sender)]
use crate::client_traits::rpc_sender::HttpRpcSender;

/// Generic RPC client configuration.
#[derive(Debug, Default, Clone)]
pub struct GenericRpcClientConfig {
    /// Transaction confirmation options.
    pub confirmation: ConfirmationConfig,
}

/// Generic RPC client implementation.
#[derive(Debug, Clone)]
pub struct GenericRpcClient<S> {
    sender: S,
    config: GenericRpcClientConfig,
}

impl<S> GenericRpcClient<S> {
    /// Create a RPC client with sender and config.
    pub fn new_with_sender_and_config(sender: S, config: GenericRpcClientConfig) -> Self {
        Self { sender, config }
    }

    /// Get the underlying sender.
    pub fn sender(&self) -> &S {
        &self.sender
    }
}

#[cfg(http_rpc_sender)]
impl GenericRpcClient<HttpRpcSender> {
    /// Create a RPC client with the given url and confirmation options.
    pub fn new_with_confirmation(url: impl ToString, confirmation: ConfirmationConfig) -> Self {
        Self::new_with_sender_and_config(
            HttpRpcSender::new(url),
            GenericRpcClientConfig { confirmation },
        )
    }

    /// Create a RPC client.
    pub fn new(url: impl ToString) -> Self {
        Self::new_with_confirmation(url, Default::default())
    }
}

impl<S: RpcSender> RpcClient for GenericRpcClient<S> {
    fn confirmation(&self) -> &ConfirmationConfig {
        &self.config.confirmation
    }

    async fn send<T>(&self, request: RpcRequest, params: impl Serialize) -> crate::Result<T>
    where
        T: DeserializeOwned,
    {
        let params = serde_json::to_value(params)?;
        if !params.is_array() && !params.is_null() {
            return Err(crate::Error::custom(
                "`params` is neither an array nor null",
            ));
        }

        let response = self.sender.send(request, params).await?;
        Ok(serde_json::from_value(response)?)
    }
}
