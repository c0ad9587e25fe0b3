#![deny(missing_docs)]
#![deny(unreachable_pub)]

//! # FanDraft SDK
//!
//! Client library for the FanDraft draft registry: contract bindings,
//! roster selection, derived leaderboard and dashboard views, and records of
//! the companion REST API.

/// Error type.
pub mod error;

/// Minimal ABI codec.
pub mod abi;

/// Draft contract bindings.
pub mod contract;

/// Domain types.
pub mod types;

/// Roster selection.
pub mod roster;

/// REST API records and client.
pub mod api;

/// Client.
#[cfg(client)]
pub mod client;

/// Active draft cache.
#[cfg(client)]
pub mod cache;

/// Client operations.
#[cfg(client)]
pub mod ops;

/// Polling streams.
#[cfg(client)]
pub mod watch;

pub use crate::{
    contract::{DraftContract, ResolutionAbi},
    error::{Error, WalletError},
    roster::{CompleteRoster, RosterSelector},
};

#[cfg(client)]
pub use crate::client::{Client, ClientOptions};

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;

pub use fandraft_evm_utils as evm_utils;
