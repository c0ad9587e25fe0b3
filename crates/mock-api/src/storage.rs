use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use fandraft_sdk::{
    api::{
        DraftRecord, EntryRecord, LeaderboardRecord, LeaderboardUpdate, NewDraft, NewEntry,
        NewPlayer, PlatformStats, LEADERBOARD_LIMIT,
    },
    types::Player,
};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::fixtures;

#[derive(Debug)]
struct Inner {
    players: IndexMap<u64, Player>,
    drafts: IndexMap<u64, DraftRecord>,
    entries: IndexMap<(u64, String), EntryRecord>,
    leaderboard: IndexMap<String, LeaderboardRecord>,
    next_player_id: u64,
    next_draft_id: u64,
    next_entry_id: u64,
    next_leaderboard_id: u64,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            players: IndexMap::new(),
            drafts: IndexMap::new(),
            entries: IndexMap::new(),
            leaderboard: IndexMap::new(),
            next_player_id: 1,
            next_draft_id: 1,
            next_entry_id: 1,
            next_leaderboard_id: 1,
        }
    }
}

fn entry_key(draft_id: u64, user_address: &str) -> (u64, String) {
    (draft_id, user_address.to_ascii_lowercase())
}

impl Inner {
    fn create_player(&mut self, player: NewPlayer) -> Player {
        let id = self.next_player_id;
        self.next_player_id += 1;
        let player = player.into_player(id);
        self.players.insert(id, player.clone());
        player
    }

    fn create_draft(&mut self, draft: NewDraft) -> DraftRecord {
        let id = self.next_draft_id;
        self.next_draft_id += 1;
        let record = DraftRecord {
            id,
            contract_id: draft.contract_id,
            name: draft.name,
            description: draft.description.filter(|d| !d.is_empty()),
            entry_fee: draft.entry_fee,
            deadline: draft.deadline,
            is_active: draft.is_active.unwrap_or(true),
            total_pool: draft
                .total_pool
                .filter(|pool| !pool.is_empty())
                .unwrap_or_else(|| "0".to_string()),
            participants: draft.participants.unwrap_or_default(),
            max_participants: draft.max_participants.filter(|max| *max != 0).unwrap_or(100),
        };
        self.drafts.insert(id, record.clone());
        record
    }

    fn update_leaderboard(&mut self, user_address: String, update: LeaderboardUpdate) -> LeaderboardRecord {
        let wins = update.total_wins.filter(|w| *w != 0);
        let earnings = update.total_earnings.filter(|e| !e.is_empty());
        let games = update.games_played.filter(|g| *g != 0);
        if let Some(existing) = self.leaderboard.get_mut(&user_address) {
            if let Some(wins) = wins {
                existing.total_wins = wins;
            }
            if let Some(earnings) = earnings {
                existing.total_earnings = earnings;
            }
            if let Some(games) = games {
                existing.games_played = games;
            }
            return existing.clone();
        }
        let id = self.next_leaderboard_id;
        self.next_leaderboard_id += 1;
        let record = LeaderboardRecord {
            id,
            user_address: user_address.clone(),
            total_wins: wins.unwrap_or_default(),
            total_earnings: earnings.unwrap_or_else(|| "0".to_string()),
            games_played: games.unwrap_or_default(),
        };
        self.leaderboard.insert(user_address, record.clone());
        record
    }
}

/// In-memory storage behind the mock API.
///
/// Nothing is persisted; a restart returns to the seed data.
#[derive(Debug, Default)]
pub struct MemStorage {
    inner: RwLock<Inner>,
}

impl MemStorage {
    /// Storage preloaded with the player catalog, three open drafts and a
    /// sample leaderboard.
    pub fn seeded() -> Self {
        let mut inner = Inner::default();
        for player in fixtures::players() {
            inner.create_player(player);
        }
        for draft in fixtures::drafts(OffsetDateTime::now_utc()) {
            inner.create_draft(draft);
        }
        for row in fixtures::leaderboard() {
            if let Some(address) = row.user_address.clone() {
                inner.update_leaderboard(address, row);
            }
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    fn read(&self) -> crate::Result<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| crate::Error::Poisoned)
    }

    fn write(&self) -> crate::Result<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| crate::Error::Poisoned)
    }

    /// All players in insertion order.
    pub fn players(&self) -> crate::Result<Vec<Player>> {
        Ok(self.read()?.players.values().cloned().collect())
    }

    /// Players whose position code equals `position` exactly.
    pub fn players_by_position(&self, position: &str) -> crate::Result<Vec<Player>> {
        Ok(self
            .read()?
            .players
            .values()
            .filter(|p| p.position.as_ref() == position)
            .cloned()
            .collect())
    }

    /// Add a player.
    pub fn create_player(&self, player: NewPlayer) -> crate::Result<Player> {
        Ok(self.write()?.create_player(player))
    }

    /// All drafts.
    pub fn drafts(&self) -> crate::Result<Vec<DraftRecord>> {
        Ok(self.read()?.drafts.values().cloned().collect())
    }

    /// Drafts flagged active.
    pub fn active_drafts(&self) -> crate::Result<Vec<DraftRecord>> {
        Ok(self
            .read()?
            .drafts
            .values()
            .filter(|d| d.is_active)
            .cloned()
            .collect())
    }

    /// Draft by id.
    pub fn draft(&self, id: u64) -> crate::Result<Option<DraftRecord>> {
        Ok(self.read()?.drafts.get(&id).cloned())
    }

    /// Add a draft, filling the defaults.
    pub fn create_draft(&self, draft: NewDraft) -> crate::Result<DraftRecord> {
        Ok(self.write()?.create_draft(draft))
    }

    /// Entries of a draft.
    pub fn entries(&self, draft_id: u64) -> crate::Result<Vec<EntryRecord>> {
        Ok(self
            .read()?
            .entries
            .values()
            .filter(|e| e.draft_id == draft_id)
            .cloned()
            .collect())
    }

    /// Entry of `user_address` in a draft. Addresses match case-insensitively.
    pub fn entry(&self, draft_id: u64, user_address: &str) -> crate::Result<Option<EntryRecord>> {
        Ok(self
            .read()?
            .entries
            .get(&entry_key(draft_id, user_address))
            .cloned())
    }

    /// Add an entry, or return `None` if the address already has one in the draft.
    pub fn create_entry(&self, draft_id: u64, entry: NewEntry) -> crate::Result<Option<EntryRecord>> {
        let mut inner = self.write()?;
        let key = entry_key(draft_id, &entry.user_address);
        if inner.entries.contains_key(&key) {
            return Ok(None);
        }
        let id = inner.next_entry_id;
        inner.next_entry_id += 1;
        let record = EntryRecord {
            id,
            draft_id,
            user_address: entry.user_address,
            player_ids: entry.player_ids,
            score: entry.score.unwrap_or_default(),
            tx_hash: entry.tx_hash.filter(|hash| !hash.is_empty()),
        };
        inner.entries.insert(key, record.clone());
        Ok(Some(record))
    }

    /// The top rows by wins. Ties keep insertion order.
    pub fn leaderboard(&self) -> crate::Result<Vec<LeaderboardRecord>> {
        let mut rows = self
            .read()?
            .leaderboard
            .values()
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| b.total_wins.cmp(&a.total_wins));
        rows.truncate(LEADERBOARD_LIMIT);
        Ok(rows)
    }

    /// Insert or update the row of `user_address`.
    pub fn update_leaderboard(
        &self,
        user_address: String,
        update: LeaderboardUpdate,
    ) -> crate::Result<LeaderboardRecord> {
        Ok(self.write()?.update_leaderboard(user_address, update))
    }

    /// Platform aggregates.
    pub fn stats(&self) -> crate::Result<PlatformStats> {
        let inner = self.read()?;
        let active = inner.drafts.values().filter(|d| d.is_active);
        let mut active_drafts = 0;
        let mut pool = Decimal::ZERO;
        for draft in active {
            active_drafts += 1;
            match draft.total_pool.trim().parse::<Decimal>() {
                Ok(amount) => pool += amount,
                Err(err) => {
                    tracing::warn!(%err, id = draft.id, pool = %draft.total_pool, "unparsable pool, counted as zero")
                }
            }
        }
        Ok(PlatformStats {
            total_players: inner.leaderboard.len(),
            active_drafts,
            total_prize_pool: pool.normalize().to_string(),
        })
    }
}
