//! # FanDraft Mock API
//!
//! In-memory REST API serving the player catalog, off-ledger draft records,
//! entries, a sample leaderboard and platform stats for development.

/// Error types.
pub mod error;

/// Seed data.
pub mod fixtures;

/// In-memory storage.
pub mod storage;

/// Route handlers.
pub mod routes;

/// Server setup.
pub mod server;

pub use crate::{
    error::{ApiError, Error},
    routes::create_router,
    server::{create_app, serve, DEFAULT_ADDR},
    storage::MemStorage,
};

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;
