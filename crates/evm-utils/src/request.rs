use std::fmt;

use serde_json::{json, Value};

/// JSON-RPC methods used against the ledger node and the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcRequest {
    /// `eth_chainId`.
    ChainId,
    /// `eth_blockNumber`.
    BlockNumber,
    /// `eth_call`.
    Call,
    /// `eth_getBalance`.
    GetBalance,
    /// `eth_sendTransaction`.
    SendTransaction,
    /// `eth_getTransactionReceipt`.
    GetTransactionReceipt,
    /// `eth_getLogs`.
    GetLogs,
    /// `eth_accounts`.
    Accounts,
    /// `eth_requestAccounts`.
    RequestAccounts,
    /// `wallet_switchEthereumChain`.
    SwitchEthereumChain,
    /// `wallet_addEthereumChain`.
    AddEthereumChain,
    /// Any other method.
    Custom {
        /// Method name.
        method: &'static str,
    },
}

impl RpcRequest {
    /// Method name on the wire.
    pub fn method(&self) -> &'static str {
        match self {
            Self::ChainId => "eth_chainId",
            Self::BlockNumber => "eth_blockNumber",
            Self::Call => "eth_call",
            Self::GetBalance => "eth_getBalance",
            Self::SendTransaction => "eth_sendTransaction",
            Self::GetTransactionReceipt => "eth_getTransactionReceipt",
            Self::GetLogs => "eth_getLogs",
            Self::Accounts => "eth_accounts",
            Self::RequestAccounts => "eth_requestAccounts",
            Self::SwitchEthereumChain => "wallet_switchEthereumChain",
            Self::AddEthereumChain => "wallet_addEthereumChain",
            Self::Custom { method } => method,
        }
    }

    /// Build the JSON-RPC 2.0 request body.
    pub fn build_request_json(self, id: u64, params: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": self.method(),
            "params": params,
        })
    }

    /// Look up a request kind by method name.
    pub fn from_method(method: &str) -> Option<Self> {
        let request = match method {
            "eth_chainId" => Self::ChainId,
            "eth_blockNumber" => Self::BlockNumber,
            "eth_call" => Self::Call,
            "eth_getBalance" => Self::GetBalance,
            "eth_sendTransaction" => Self::SendTransaction,
            "eth_getTransactionReceipt" => Self::GetTransactionReceipt,
            "eth_getLogs" => Self::GetLogs,
            "eth_accounts" => Self::Accounts,
            "eth_requestAccounts" => Self::RequestAccounts,
            "wallet_switchEthereumChain" => Self::SwitchEthereumChain,
            "wallet_addEthereumChain" => Self::AddEthereumChain,
            _ => return None,
        };
        Some(request)
    }
}

impl fmt::Display for RpcRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}
