//! A transport for JSON-RPC calls.

use std::{future::Future, sync::Arc, time::Duration};

use crate::RpcRequest;

#[cfg(http_rpc_sender)]
mod http_rpc_sender;

#[cfg(http_rpc_sender)]
pub use http_rpc_sender::HttpRpcSender;

/// Type describing the status of RPC transport.
#[derive(Debug, Default, Clone)]
pub struct RpcTransportStats {
    /// Number of RPC requests issued.
    pub request_count: usize,

    /// Total amount of time spent transacting with the RPC server.
    pub elapsed_time: Duration,

    /// Total amount of waiting time due to RPC server rate limiting
    /// (a subset of `elapsed_time`)
    pub rate_limited_time: Duration,
}

/// A transport for JSON-RPC calls.
///
/// `RpcSender` implements the underlying transport of requests to, and
/// responses from, a ledger node or a wallet provider.
pub trait RpcSender {
    /// Send an [`RpcRequest`] with JSON parameters.
    ///
    /// A JSON-RPC error object in the response must be returned as [`Error::Rpc`](crate::Error::Rpc).
    fn send(
        &self,
        request: RpcRequest,
        params: serde_json::Value,
    ) -> impl Future<Output = crate::Result<serde_json::Value>>;

    /// Get RPC transport statistics.
    fn get_transport_stats(&self) -> RpcTransportStats;

    /// Get the RPC endpoint URL.
    fn url(&self) -> String;
}

impl<S: RpcSender> RpcSender for Arc<S> {
    fn send(
        &self,
        request: RpcRequest,
        params: serde_json::Value,
    ) -> impl Future<Output = crate::Result<serde_json::Value>> {
        (**self).send(request, params)
    }

    fn get_transport_stats(&self) -> RpcTransportStats {
        (**self).get_transport_stats()
    }

    fn url(&self) -> String {
        (**self).url()
    }
}
