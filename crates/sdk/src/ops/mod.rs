/// Registry reads.
pub mod registry;

/// Ledger-mutating actions.
pub mod actions;

/// Leaderboard derivations.
pub mod leaderboard;

/// Dashboard and history views.
pub mod dashboard;

/// Wallet session.
pub mod wallet;

pub use self::{
    actions::ActionOps, dashboard::DashboardOps, leaderboard::LeaderboardOps,
    registry::RegistryOps, wallet::WalletOps,
};
