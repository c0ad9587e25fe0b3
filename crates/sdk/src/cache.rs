use tokio::sync::Mutex;

use crate::types::Draft;

#[derive(Debug, Clone)]
struct Entry {
    counter: u64,
    drafts: Vec<Draft>,
}

/// Cache of the active draft list, keyed on the ledger's draft counter.
///
/// An entry is served while the counter is unchanged. Resolutions by other
/// clients do not change the counter, so they are only picked up after
/// [`invalidate`](Self::invalidate) or when a new draft is created.
#[derive(Debug, Default)]
pub struct DraftCache {
    entry: Mutex<Option<Entry>>,
}

impl DraftCache {
    /// Cached drafts for `counter`, if any.
    pub async fn get(&self, counter: u64) -> Option<Vec<Draft>> {
        self.entry
            .lock()
            .await
            .as_ref()
            .filter(|entry| entry.counter == counter)
            .map(|entry| entry.drafts.clone())
    }

    /// Store the drafts computed for `counter`.
    pub async fn put(&self, counter: u64, drafts: Vec<Draft>) {
        *self.entry.lock().await = Some(Entry { counter, drafts });
    }

    /// Drop the cached entry.
    pub async fn invalidate(&self) {
        self.entry.lock().await.take();
    }
}
