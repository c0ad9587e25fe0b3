use std::future::Future;

use fandraft_evm_utils::{client_traits::RpcSender, units, Address, TxHash, U256};
use rust_decimal::Decimal;

use crate::{
    client::now_unix,
    roster::CompleteRoster,
    types::Draft,
};

use super::RegistryOps;

/// Shortest draft duration in hours.
pub const MIN_DURATION_HOURS: u64 = 1;
/// Longest draft duration in hours (one week).
pub const MAX_DURATION_HOURS: u64 = 168;

/// Validate draft parameters and return the duration in seconds.
pub fn draft_duration_seconds(name: &str, duration_hours: u64) -> crate::Result<u64> {
    if name.trim().is_empty() {
        return Err(crate::Error::validation("Draft name is required"));
    }
    if !(MIN_DURATION_HOURS..=MAX_DURATION_HOURS).contains(&duration_hours) {
        return Err(crate::Error::validation(format!(
            "Duration must be between {MIN_DURATION_HOURS} and {MAX_DURATION_HOURS} hours"
        )));
    }
    Ok(duration_hours * 3600)
}

/// Check that `draft` can be resolved at `now`.
pub fn check_resolvable(draft: &Draft, now: u64) -> crate::Result<()> {
    if !draft.is_active {
        return Err(crate::Error::validation(format!(
            "Draft #{} is already resolved",
            draft.id
        )));
    }
    if !draft.is_expired(now) {
        return Err(crate::Error::validation(format!(
            "Draft #{} cannot be resolved before its deadline",
            draft.id
        )));
    }
    Ok(())
}

/// Check that `draft` still accepts entries at `now`.
pub fn check_joinable(draft: &Draft, now: u64) -> crate::Result<()> {
    if !draft.is_active || draft.is_expired(now) {
        return Err(crate::Error::validation(format!(
            "Draft #{} is no longer accepting entries",
            draft.id
        )));
    }
    Ok(())
}

/// Convert an entry fee in whole tokens into minor units.
pub fn fee_amount(fee: Decimal) -> crate::Result<U256> {
    if fee.is_sign_negative() && !fee.is_zero() {
        return Err(crate::Error::validation("Entry fee cannot be negative"));
    }
    units::parse_ether(fee).map_err(crate::Error::validation)
}

/// Ledger-mutating operations.
///
/// Each operation requires a connected account, submits one transaction
/// and resolves once it is mined. Local validation failures are reported
/// as [`Error::Validation`](crate::Error::Validation) before anything is sent.
pub trait ActionOps {
    /// Join a draft, paying `entry_fee` or the current fee if `None`.
    fn join_draft(
        &self,
        id: u64,
        roster: &CompleteRoster,
        entry_fee: Option<U256>,
    ) -> impl Future<Output = crate::Result<TxHash>>;

    /// Create a draft lasting `duration_hours`.
    fn create_draft(
        &self,
        name: &str,
        duration_hours: u64,
    ) -> impl Future<Output = crate::Result<TxHash>>;

    /// Resolve an expired draft.
    fn resolve_draft(
        &self,
        id: u64,
        winners: &[Address],
        scores: &[U256],
    ) -> impl Future<Output = crate::Result<TxHash>>;

    /// Change the entry fee. Owner only.
    fn change_entry_fee(&self, fee: Decimal) -> impl Future<Output = crate::Result<TxHash>>;

    /// Withdraw the platform revenue. Owner only.
    fn withdraw_revenue(&self) -> impl Future<Output = crate::Result<TxHash>>;

    /// Returns the account if it is the contract owner.
    fn require_owner(&self) -> impl Future<Output = crate::Result<Address>>;
}

impl<S: RpcSender> ActionOps for crate::Client<S> {
    async fn join_draft(
        &self,
        id: u64,
        roster: &CompleteRoster,
        entry_fee: Option<U256>,
    ) -> crate::Result<TxHash> {
        let account = self.require_account()?;
        let data = self.contract().join_draft(id, roster);
        let draft = self.draft_state(id).await?;
        check_joinable(&draft, now_unix())?;
        if self.participants(id).await?.contains(&account) {
            return Err(crate::Error::validation(format!(
                "You have already joined draft #{id}"
            )));
        }
        let fee = match entry_fee {
            Some(fee) => fee,
            None => self.entry_fee().await?,
        };
        self.submit("join draft", data, Some(fee)).await
    }

    async fn create_draft(&self, name: &str, duration_hours: u64) -> crate::Result<TxHash> {
        let seconds = draft_duration_seconds(name, duration_hours)?;
        self.require_account()?;
        let data = self.contract().create_draft(name.trim(), seconds);
        self.submit("create draft", data, None).await
    }

    async fn resolve_draft(
        &self,
        id: u64,
        winners: &[Address],
        scores: &[U256],
    ) -> crate::Result<TxHash> {
        let data = self.contract().resolve_draft(id, winners, scores)?;
        self.require_account()?;
        let draft = self.draft_state(id).await?;
        check_resolvable(&draft, now_unix())?;
        self.submit("resolve draft", data, None).await
    }

    async fn change_entry_fee(&self, fee: Decimal) -> crate::Result<TxHash> {
        let amount = fee_amount(fee)?;
        self.require_owner().await?;
        let data = self.contract().change_entry_fee(amount);
        self.submit("change entry fee", data, None).await
    }

    async fn withdraw_revenue(&self) -> crate::Result<TxHash> {
        self.require_owner().await?;
        let data = self.contract().withdraw_revenue();
        self.submit("withdraw revenue", data, None).await
    }

    async fn require_owner(&self) -> crate::Result<Address> {
        let account = self.require_account()?;
        let owner = self.owner().await?;
        if owner != account {
            return Err(crate::Error::validation(format!(
                "Only the contract owner ({}) can perform this action",
                owner.short()
            )));
        }
        Ok(account)
    }
}
