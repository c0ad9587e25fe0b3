use std::time::Duration;

use fandraft_evm_utils::client_traits::RpcSender;
use futures_util::{Stream, StreamExt};
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;

use crate::{
    ops::{LeaderboardOps, RegistryOps},
    types::Draft,
};

/// Default refresh period of the active draft list.
pub const ACTIVE_DRAFTS_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Default refresh period of the participant count.
pub const PARTICIPANTS_POLL_INTERVAL: Duration = Duration::from_secs(60);

const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

fn interval(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(period.max(MIN_POLL_INTERVAL));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

impl<S: RpcSender> crate::Client<S> {
    /// Poll the active draft list every `period`. The first item is
    /// produced immediately.
    ///
    /// Every tick reads the ledger again, bypassing the request cache, so
    /// entries and resolutions by other accounts show up on the next poll.
    /// A failed refresh is yielded as an error and polling continues.
    pub fn watch_active_drafts(
        &self,
        period: Duration,
    ) -> impl Stream<Item = crate::Result<Vec<Draft>>> + '_ {
        async_stream::stream! {
            let mut interval = interval(period);
            loop {
                interval.tick().await;
                yield self.active_drafts().await;
            }
        }
    }

    /// Poll the number of distinct participants every `period`.
    pub fn watch_unique_participants(
        &self,
        period: Duration,
    ) -> impl Stream<Item = crate::Result<usize>> + '_ {
        IntervalStream::new(interval(period)).then(move |_| self.unique_participant_count())
    }
}
