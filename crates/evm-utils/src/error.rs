use serde::Deserialize;

/// Error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Parse url error.
    #[error("parse url: {0}")]
    ParseUrl(#[from] url::ParseError),
    /// Parse chain error.
    #[error("parse chain: {0}")]
    ParseChain(String),
    /// Error object returned by the JSON-RPC endpoint.
    #[error("{0}")]
    Rpc(RpcErrorObject),
    /// Malformed hex input.
    #[error("hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// Malformed address.
    #[error("invalid address `{0}`")]
    InvalidAddress(String),
    /// Malformed quantity.
    #[error("invalid quantity `{0}`")]
    InvalidQuantity(String),
    /// Amount conversion error.
    #[error("amount: {0}")]
    Amount(String),
    /// Confirmation timed out.
    #[error("transaction {0} was not confirmed in time")]
    ConfirmationTimeout(crate::TxHash),
    /// JSON error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    /// Reqwest error.
    #[cfg(http_rpc_sender)]
    #[error("reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Custom error.
    #[error("custom: {0}")]
    Custom(String),
}

impl Error {
    /// Create a custom error.
    pub fn custom(msg: impl ToString) -> Self {
        Self::Custom(msg.to_string())
    }

    /// Returns the JSON-RPC error code if this is an RPC error.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            Self::Rpc(object) => Some(object.code),
            _ => None,
        }
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcErrorObject {
    /// Error code.
    pub code: i64,
    /// Error message.
    pub message: String,
    /// Optional payload, e.g. revert data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl std::fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RPC response error {}: {}", self.code, self.message)
    }
}

impl From<RpcErrorObject> for Error {
    fn from(object: RpcErrorObject) -> Self {
        Self::Rpc(object)
    }
}
