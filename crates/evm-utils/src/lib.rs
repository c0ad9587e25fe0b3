#![deny(missing_docs)]
#![deny(unreachable_pub)]

//! # FanDraft EVM Utils
//!
//! JSON-RPC transport, ledger primitives and chain configuration shared by the
//! FanDraft client crates.

/// Error type.
pub mod error;

/// Chain.
pub mod chain;

/// Ledger primitive types.
pub mod types;

/// Ether unit conversions.
pub mod units;

/// JSON-RPC request kinds.
pub mod request;

/// Client traits.
pub mod client_traits;

pub use crate::{
    chain::{Chain, ChainParams},
    error::Error,
    request::RpcRequest,
    types::{Address, Bytes, TxHash, H256, U256},
};

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Keccak-256 digest of `data`.
pub fn keccak256(data: impl AsRef<[u8]>) -> H256 {
    use sha3::{Digest, Keccak256};

    H256(Keccak256::digest(data.as_ref()).into())
}
