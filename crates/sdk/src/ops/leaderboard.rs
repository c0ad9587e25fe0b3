use std::future::Future;

use fandraft_evm_utils::{client_traits::RpcSender, Address};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::{
    contract,
    types::{LeaderboardEntry, PlayerStats},
};

use super::RegistryOps;

/// Placeholder earnings per win used by the derived leaderboard.
pub const EARNINGS_PER_WIN: u64 = 10;

/// Leaderboard derivations.
pub trait LeaderboardOps {
    /// Total wins recorded for `address`.
    fn total_wins(&self, address: &Address) -> impl Future<Output = crate::Result<u64>>;

    /// Ledger statistics of `address`, zeros if the call fails.
    fn player_stats(&self, address: &Address) -> impl Future<Output = PlayerStats>;

    /// Every address that joined any draft, mapped to the number of drafts
    /// it joined, in first-seen order.
    fn participation(&self) -> impl Future<Output = crate::Result<IndexMap<Address, u64>>>;

    /// Number of distinct participants over all drafts.
    fn unique_participant_count(&self) -> impl Future<Output = crate::Result<usize>>;

    /// Addresses with at least one win, sorted by wins descending.
    /// Ties keep first-seen order.
    fn leaderboard(&self) -> impl Future<Output = crate::Result<Vec<LeaderboardEntry>>>;
}

impl<S: RpcSender> LeaderboardOps for crate::Client<S> {
    async fn total_wins(&self, address: &Address) -> crate::Result<u64> {
        let data = self.call(self.contract().total_wins(address)).await?;
        contract::decode_u64(data.as_slice())
    }

    async fn player_stats(&self, address: &Address) -> PlayerStats {
        let stats = async {
            let data = self.call(self.contract().get_leaderboard(address)).await?;
            contract::decode_player_stats(data.as_slice())
        };
        stats.await.unwrap_or_else(|err| {
            tracing::warn!(%err, %address, "failed to fetch player stats");
            PlayerStats::default()
        })
    }

    async fn participation(&self) -> crate::Result<IndexMap<Address, u64>> {
        let counter = self.draft_counter().await?;
        let mut games = IndexMap::<Address, u64>::new();
        for id in 1..=counter {
            match self.participants(id).await {
                Ok(participants) => {
                    for address in participants {
                        *games.entry(address).or_default() += 1;
                    }
                }
                Err(err) => tracing::warn!(%err, id, "failed to fetch participants, skipped"),
            }
        }
        Ok(games)
    }

    async fn unique_participant_count(&self) -> crate::Result<usize> {
        Ok(self.participation().await?.len())
    }

    async fn leaderboard(&self) -> crate::Result<Vec<LeaderboardEntry>> {
        let games = self.participation().await?;
        let mut entries = Vec::new();
        for (address, games_played) in games {
            let wins = match self.total_wins(&address).await {
                Ok(wins) => wins,
                Err(err) => {
                    tracing::warn!(%err, %address, "failed to fetch wins, skipped");
                    continue;
                }
            };
            if wins == 0 {
                continue;
            }
            entries.push(LeaderboardEntry {
                address,
                wins,
                approximate_earnings: Decimal::from(wins) * Decimal::from(EARNINGS_PER_WIN),
                games_played,
            });
        }
        entries.sort_by(|a, b| b.wins.cmp(&a.wins));
        Ok(entries)
    }
}
