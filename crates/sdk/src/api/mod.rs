//! Records of the FanDraft REST API.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{Player, Position};

#[cfg(api)]
mod client;

#[cfg(api)]
pub use client::ApiClient;

/// Default number of rows returned by the leaderboard endpoint.
pub const LEADERBOARD_LIMIT: usize = 10;

/// A draft listed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    /// Record id.
    pub id: u64,
    /// Id of the draft on the ledger.
    pub contract_id: u64,
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Entry fee as a decimal string.
    pub entry_fee: String,
    /// Deadline.
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
    /// Whether the draft is open.
    pub is_active: bool,
    /// Prize pool as a decimal string.
    pub total_pool: String,
    /// Number of participants.
    pub participants: u64,
    /// Participant limit.
    pub max_participants: u64,
}

/// Body of `POST /api/drafts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDraft {
    /// Id of the draft on the ledger.
    pub contract_id: u64,
    /// Name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Entry fee as a decimal string.
    pub entry_fee: String,
    /// Deadline.
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
    /// Defaults to `true`.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Defaults to `"0"`.
    #[serde(default)]
    pub total_pool: Option<String>,
    /// Defaults to 0.
    #[serde(default)]
    pub participants: Option<u64>,
    /// Defaults to 100.
    #[serde(default)]
    pub max_participants: Option<u64>,
}

/// A draft entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    /// Record id.
    pub id: u64,
    /// Draft record id.
    pub draft_id: u64,
    /// Participant address as submitted.
    pub user_address: String,
    /// Selected player ids.
    pub player_ids: Option<Vec<String>>,
    /// Score.
    pub score: i64,
    /// Join transaction.
    pub tx_hash: Option<String>,
}

/// Body of `POST /api/drafts/:id/entries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    /// Participant address.
    pub user_address: String,
    /// Selected player ids.
    #[serde(default)]
    pub player_ids: Option<Vec<String>>,
    /// Defaults to 0.
    #[serde(default)]
    pub score: Option<i64>,
    /// Join transaction.
    #[serde(default)]
    pub tx_hash: Option<String>,
}

/// A leaderboard row kept by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRecord {
    /// Record id.
    pub id: u64,
    /// Address as submitted.
    pub user_address: String,
    /// Wins.
    pub total_wins: u64,
    /// Earnings as a decimal string.
    pub total_earnings: String,
    /// Games played.
    pub games_played: u64,
}

/// Body of `POST /api/leaderboard`. Missing or zero fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardUpdate {
    /// Address, required.
    #[serde(default)]
    pub user_address: Option<String>,
    /// Wins.
    #[serde(default)]
    pub total_wins: Option<u64>,
    /// Earnings as a decimal string.
    #[serde(default)]
    pub total_earnings: Option<String>,
    /// Games played.
    #[serde(default)]
    pub games_played: Option<u64>,
}

/// Body of `POST /api/players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    /// Name.
    pub name: String,
    /// Club.
    pub team: String,
    /// Position.
    pub position: Position,
    /// Defaults to 0.
    #[serde(default)]
    pub points: Option<i64>,
    /// Portrait.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewPlayer {
    /// Assign an id.
    pub fn into_player(self, id: u64) -> Player {
        Player {
            id,
            name: self.name,
            team: self.team,
            position: self.position,
            points: self.points.unwrap_or_default(),
            image_url: self.image_url,
        }
    }
}

/// Response of `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    /// Number of leaderboard rows.
    pub total_players: usize,
    /// Number of active drafts.
    pub active_drafts: usize,
    /// Sum of the active pools as a decimal string.
    pub total_prize_pool: String,
}

/// Error body returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Message.
    pub error: String,
}
