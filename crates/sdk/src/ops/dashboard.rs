use std::future::Future;

use fandraft_evm_utils::{client_traits::RpcSender, Address, U256};

use crate::types::{DashboardStats, HistoryEntry};

use super::{LeaderboardOps, RegistryOps};

/// Per-user views composed from registry reads.
pub trait DashboardOps {
    /// Drafts `user` joined, newest first. Drafts that fail to load are skipped.
    fn user_history(&self, user: &Address) -> impl Future<Output = crate::Result<Vec<HistoryEntry>>>;

    /// Dashboard aggregates for the connected account, if any.
    fn dashboard_stats(&self) -> impl Future<Output = crate::Result<DashboardStats>>;
}

impl<S: RpcSender> DashboardOps for crate::Client<S> {
    async fn user_history(&self, user: &Address) -> crate::Result<Vec<HistoryEntry>> {
        let counter = self.draft_counter().await?;
        let mut history = Vec::new();
        for id in 1..=counter {
            let participants = match self.participants(id).await {
                Ok(participants) => participants,
                Err(err) => {
                    tracing::warn!(%err, id, "failed to fetch participants, skipped");
                    continue;
                }
            };
            if !participants.contains(user) {
                continue;
            }
            let draft = match self.draft_state(id).await {
                Ok(draft) => draft,
                Err(err) => {
                    tracing::warn!(%err, id, "failed to fetch draft, skipped");
                    continue;
                }
            };
            let has_won = self
                .winners(id)
                .await
                .map(|winners| winners.contains(user))
                .unwrap_or_else(|err| {
                    tracing::warn!(%err, id, "failed to fetch winners");
                    false
                });
            history.push(HistoryEntry {
                draft_id: id,
                name: self.draft_name(id).await,
                total_pool: draft.total_pool,
                deadline: draft.deadline,
                is_active: draft.is_active,
                has_won,
                participant_count: participants.len(),
            });
        }
        history.sort_by(|a, b| b.draft_id.cmp(&a.draft_id));
        Ok(history)
    }

    async fn dashboard_stats(&self) -> crate::Result<DashboardStats> {
        let active = self.active_drafts_cached().await?;
        let total_active_pool = active
            .iter()
            .fold(U256::ZERO, |sum, draft| sum.saturating_add(draft.total_pool));
        let platform_revenue = self.platform_revenue().await.unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to fetch platform revenue");
            U256::ZERO
        });
        let unique_participants = self.unique_participant_count().await?;

        let mut stats = DashboardStats {
            active_drafts: active.len(),
            total_active_pool,
            user_wins: None,
            platform_revenue,
            unique_participants,
            is_owner: false,
        };
        if let Some(account) = self.account().copied() {
            stats.user_wins = match self.total_wins(&account).await {
                Ok(wins) => Some(wins),
                Err(err) => {
                    tracing::warn!(%err, %account, "failed to fetch wins");
                    None
                }
            };
            stats.is_owner = match self.owner().await {
                Ok(owner) => owner == account,
                Err(err) => {
                    tracing::warn!(%err, "failed to fetch owner");
                    false
                }
            };
        }
        Ok(stats)
    }
}
