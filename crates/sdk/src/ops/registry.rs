use std::future::Future;

use fandraft_evm_utils::{
    client_traits::{RpcClientExt, RpcSender},
    types::{BlockId, LogFilter},
    Address, U256,
};

use crate::{
    contract::{self, DraftResolved},
    types::{Draft, DraftDetails},
};

/// Read operations on the draft registry.
pub trait RegistryOps {
    /// Number of drafts ever created. Ids run from 1 to the counter.
    fn draft_counter(&self) -> impl Future<Output = crate::Result<u64>>;

    /// Current entry fee in minor units.
    fn entry_fee(&self) -> impl Future<Output = crate::Result<U256>>;

    /// Contract owner.
    fn owner(&self) -> impl Future<Output = crate::Result<Address>>;

    /// Revenue accumulated by the platform in minor units.
    fn platform_revenue(&self) -> impl Future<Output = crate::Result<U256>>;

    /// Native balance held by the contract.
    fn contract_balance(&self) -> impl Future<Output = crate::Result<U256>>;

    /// Draft state without its name.
    fn draft_state(&self, id: u64) -> impl Future<Output = crate::Result<Draft>>;

    /// Draft name, `None` if the contract call fails.
    fn draft_name(&self, id: u64) -> impl Future<Output = Option<String>>;

    /// Draft with its name.
    fn draft(&self, id: u64) -> impl Future<Output = crate::Result<Draft>>;

    /// Names of all drafts.
    fn all_draft_names(&self) -> impl Future<Output = crate::Result<Vec<String>>>;

    /// Participants of a draft in join order.
    fn participants(&self, id: u64) -> impl Future<Output = crate::Result<Vec<Address>>>;

    /// Player ids submitted by `user`.
    fn player_selection(
        &self,
        id: u64,
        user: &Address,
    ) -> impl Future<Output = crate::Result<Vec<u64>>>;

    /// Winners of a draft, empty until resolved.
    fn winners(&self, id: u64) -> impl Future<Output = crate::Result<Vec<Address>>>;

    /// Draft with participants and winners. Failures to fetch either list
    /// yield an empty list.
    fn draft_details(&self, id: u64) -> impl Future<Output = crate::Result<DraftDetails>>;

    /// Active drafts in ascending id order.
    ///
    /// Drafts that fail to load are logged and left out.
    fn active_drafts(&self) -> impl Future<Output = crate::Result<Vec<Draft>>>;

    /// Same as [`active_drafts`](Self::active_drafts), served from the
    /// [`DraftCache`](crate::cache::DraftCache) while the counter is unchanged.
    fn active_drafts_cached(&self) -> impl Future<Output = crate::Result<Vec<Draft>>>;

    /// `DraftResolved` events since `from_block`.
    fn resolution_events(
        &self,
        from_block: u64,
    ) -> impl Future<Output = crate::Result<Vec<DraftResolved>>>;
}

impl<S: RpcSender> RegistryOps for crate::Client<S> {
    async fn draft_counter(&self) -> crate::Result<u64> {
        let data = self.call(self.contract().draft_counter()).await?;
        contract::decode_u64(data.as_slice())
    }

    async fn entry_fee(&self) -> crate::Result<U256> {
        let data = self.call(self.contract().entry_fee()).await?;
        contract::decode_uint(data.as_slice())
    }

    async fn owner(&self) -> crate::Result<Address> {
        let data = self.call(self.contract().owner()).await?;
        contract::decode_address(data.as_slice())
    }

    async fn platform_revenue(&self) -> crate::Result<U256> {
        let data = self.call(self.contract().platform_revenue()).await?;
        contract::decode_uint(data.as_slice())
    }

    async fn contract_balance(&self) -> crate::Result<U256> {
        Ok(self
            .rpc()
            .get_balance(self.contract().address(), BlockId::Latest)
            .await?)
    }

    async fn draft_state(&self, id: u64) -> crate::Result<Draft> {
        let data = self.call(self.contract().get_draft(id)).await?;
        contract::decode_draft(data.as_slice())
    }

    async fn draft_name(&self, id: u64) -> Option<String> {
        let name = async {
            let data = self.call(self.contract().get_draft_name(id)).await?;
            contract::decode_string(data.as_slice())
        };
        match name.await {
            Ok(name) => Some(name),
            Err(err) => {
                tracing::debug!(%err, id, "draft name unavailable");
                None
            }
        }
    }

    async fn draft(&self, id: u64) -> crate::Result<Draft> {
        let mut draft = self.draft_state(id).await?;
        draft.name = self.draft_name(id).await;
        Ok(draft)
    }

    async fn all_draft_names(&self) -> crate::Result<Vec<String>> {
        let data = self.call(self.contract().get_all_draft_names()).await?;
        contract::decode_string_array(data.as_slice())
    }

    async fn participants(&self, id: u64) -> crate::Result<Vec<Address>> {
        let data = self.call(self.contract().get_participants(id)).await?;
        contract::decode_address_array(data.as_slice())
    }

    async fn player_selection(&self, id: u64, user: &Address) -> crate::Result<Vec<u64>> {
        let data = self
            .call(self.contract().get_player_selection(id, user))
            .await?;
        contract::decode_id_array(data.as_slice())
    }

    async fn winners(&self, id: u64) -> crate::Result<Vec<Address>> {
        let data = self.call(self.contract().get_winners(id)).await?;
        self.contract().decode_winners(data.as_slice())
    }

    async fn draft_details(&self, id: u64) -> crate::Result<DraftDetails> {
        let draft = self.draft(id).await?;
        let participants = self.participants(id).await.unwrap_or_else(|err| {
            tracing::warn!(%err, id, "could not fetch participants");
            Vec::new()
        });
        let winners = self.winners(id).await.unwrap_or_else(|err| {
            tracing::warn!(%err, id, "could not fetch winners");
            Vec::new()
        });
        Ok(DraftDetails {
            draft,
            participants,
            winners,
        })
    }

    async fn active_drafts(&self) -> crate::Result<Vec<Draft>> {
        let counter = self.draft_counter().await?;
        active_drafts_up_to(self, counter).await
    }

    async fn active_drafts_cached(&self) -> crate::Result<Vec<Draft>> {
        let counter = self.draft_counter().await?;
        if let Some(drafts) = self.cache().get(counter).await {
            tracing::trace!(counter, "serving active drafts from cache");
            return Ok(drafts);
        }
        let drafts = active_drafts_up_to(self, counter).await?;
        self.cache().put(counter, drafts.clone()).await;
        Ok(drafts)
    }

    async fn resolution_events(&self, from_block: u64) -> crate::Result<Vec<DraftResolved>> {
        let topic = self.contract().draft_resolved_topic().ok_or_else(|| {
            crate::Error::validation(format!(
                "the {} resolution ABI declares no DraftResolved event, use polling instead",
                self.contract().resolution()
            ))
        })?;
        let filter = LogFilter {
            from_block: BlockId::Number(from_block),
            to_block: BlockId::Latest,
            address: *self.contract().address(),
            topics: vec![Some(topic)],
        };
        let logs = self.rpc().get_logs(&filter).await?;
        let events = logs
            .iter()
            .filter_map(|log| match self.contract().decode_draft_resolved(log) {
                Ok(event) => Some(event),
                Err(err) => {
                    tracing::warn!(%err, tx = ?log.transaction_hash, "skipping malformed log");
                    None
                }
            })
            .collect();
        Ok(events)
    }
}

async fn active_drafts_up_to<S: RpcSender>(
    client: &crate::Client<S>,
    counter: u64,
) -> crate::Result<Vec<Draft>> {
    let mut drafts = Vec::new();
    for id in 1..=counter {
        match client.draft_state(id).await {
            Ok(draft) if draft.is_active => drafts.push(draft),
            Ok(_) => {}
            Err(err) => tracing::warn!(%err, id, "failed to fetch draft, skipped"),
        }
    }
    for draft in drafts.iter_mut() {
        draft.name = client.draft_name(draft.id).await;
    }
    Ok(drafts)
}
