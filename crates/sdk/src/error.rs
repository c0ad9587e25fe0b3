use fandraft_evm_utils::TxHash;

/// JSON-RPC code of a request rejected by the user.
pub const USER_REJECTED: i64 = 4001;
/// JSON-RPC code of an unsupported method.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// JSON-RPC code of a chain unknown to the wallet.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;
/// JSON-RPC code of a request the wallet is already processing.
pub const REQUEST_PENDING: i64 = -32002;

/// Wallet-related failures.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// No account is connected.
    #[error("wallet is not connected, run `wallet connect` or configure an account")]
    NotConnected,
    /// The user rejected the request.
    #[error("request was rejected in the wallet")]
    Rejected,
    /// The wallet does not know the chain.
    #[error("the wallet does not know the chain, it must be added first ({0})")]
    UnknownChain(String),
    /// A previous request is still pending in the wallet.
    #[error("a wallet request is already pending, open the wallet to continue")]
    RequestPending,
    /// Connected to the wrong network.
    #[error("wrong network: expected chain id {expected}, found {found}")]
    WrongNetwork {
        /// Expected chain id.
        expected: u64,
        /// Chain id reported by the provider.
        found: u64,
    },
}

/// SDK Error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Local input validation failed. Nothing was sent.
    #[error("{0}")]
    Validation(String),
    /// Wallet error.
    #[error(transparent)]
    Wallet(#[from] WalletError),
    /// Transport or node error.
    #[error("rpc: {0}")]
    Rpc(fandraft_evm_utils::Error),
    /// The transaction was mined but reverted.
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    /// Malformed ABI data.
    #[error("abi: {0}")]
    Abi(String),
    /// JSON error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    /// Reqwest error.
    #[cfg(api)]
    #[error("reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Custom error.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Create a custom error.
    pub fn custom(msg: impl ToString) -> Self {
        Self::Custom(msg.to_string())
    }

    /// Create a validation error.
    pub fn validation(msg: impl ToString) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an ABI error.
    pub fn abi(msg: impl ToString) -> Self {
        Self::Abi(msg.to_string())
    }

    /// Returns whether the error was raised before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<fandraft_evm_utils::Error> for Error {
    fn from(err: fandraft_evm_utils::Error) -> Self {
        match err.rpc_code() {
            Some(USER_REJECTED) => WalletError::Rejected.into(),
            Some(REQUEST_PENDING) => WalletError::RequestPending.into(),
            Some(UNRECOGNIZED_CHAIN) => WalletError::UnknownChain(err.to_string()).into(),
            _ => Self::Rpc(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use fandraft_evm_utils::error::RpcErrorObject;

    use super::*;

    fn rpc_error(code: i64) -> fandraft_evm_utils::Error {
        RpcErrorObject {
            code,
            message: "boom".to_string(),
            data: None,
        }
        .into()
    }

    #[test]
    fn wallet_codes_are_rewritten() {
        assert!(matches!(
            Error::from(rpc_error(4001)),
            Error::Wallet(WalletError::Rejected)
        ));
        assert!(matches!(
            Error::from(rpc_error(-32002)),
            Error::Wallet(WalletError::RequestPending)
        ));
        assert!(matches!(
            Error::from(rpc_error(4902)),
            Error::Wallet(WalletError::UnknownChain(_))
        ));
        assert!(matches!(Error::from(rpc_error(3)), Error::Rpc(_)));
    }
}
