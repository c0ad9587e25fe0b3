use fandraft_evm_utils::{types::quantity, units, Address, U256};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Player position.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(clap, derive(clap::ValueEnum))]
pub enum Position {
    /// Goalkeeper.
    #[serde(rename = "GK")]
    #[strum(serialize = "GK")]
    #[cfg_attr(clap, value(name = "GK", alias = "gk"))]
    Goalkeeper,
    /// Defender.
    #[serde(rename = "DEF")]
    #[strum(serialize = "DEF")]
    #[cfg_attr(clap, value(name = "DEF", alias = "def"))]
    Defender,
    /// Midfielder.
    #[serde(rename = "MID")]
    #[strum(serialize = "MID")]
    #[cfg_attr(clap, value(name = "MID", alias = "mid"))]
    Midfielder,
    /// Forward.
    #[serde(rename = "FWD")]
    #[strum(serialize = "FWD")]
    #[cfg_attr(clap, value(name = "FWD", alias = "fwd"))]
    Forward,
}

impl Position {
    /// Maximum number of players of this position in a roster.
    pub const fn cap(&self) -> usize {
        match self {
            Self::Goalkeeper => 1,
            Self::Defender => 4,
            Self::Midfielder => 3,
            Self::Forward => 3,
        }
    }
}

/// A player of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Player id.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Club.
    pub team: String,
    /// Position.
    pub position: Position,
    /// Fantasy points.
    pub points: i64,
    /// Portrait.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A draft as recorded by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Draft id, starting from 1.
    pub id: u64,
    /// Display name, if the contract returned one.
    pub name: Option<String>,
    /// Whether the draft is still open (not resolved).
    pub is_active: bool,
    /// Prize pool in minor units.
    #[serde(with = "quantity::u256_hex")]
    pub total_pool: U256,
    /// Deadline, unix seconds.
    pub deadline: u64,
}

impl Draft {
    /// Name to display, falling back to `Draft #id`.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Draft #{}", self.id))
    }

    /// Whether the deadline has passed at `now`.
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.deadline
    }

    /// Whether the draft can be resolved at `now`.
    pub fn is_resolvable(&self, now: u64) -> bool {
        self.is_active && self.is_expired(now)
    }
}

/// A draft together with its participants and winners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDetails {
    /// Draft.
    #[serde(flatten)]
    pub draft: Draft,
    /// Participants in join order.
    pub participants: Vec<Address>,
    /// Winners, empty until resolved.
    pub winners: Vec<Address>,
}

impl DraftDetails {
    /// Whether `account` has joined.
    pub fn has_joined(&self, account: &Address) -> bool {
        self.participants.contains(account)
    }
}

/// Per-player statistics recorded by the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// Games played.
    pub total_games: u64,
    /// Wins.
    pub wins: u64,
    /// Total winnings in minor units.
    #[serde(with = "quantity::u256_hex")]
    pub total_winnings: U256,
    /// Win rate as reported by the contract.
    pub win_rate: u64,
}

/// A derived leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Participant.
    pub address: Address,
    /// Total wins.
    pub wins: u64,
    /// Placeholder earnings estimate.
    pub approximate_earnings: Decimal,
    /// Number of scanned drafts the address joined.
    pub games_played: u64,
}

/// A draft the user took part in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Draft id.
    pub draft_id: u64,
    /// Display name.
    pub name: Option<String>,
    /// Prize pool in minor units.
    #[serde(with = "quantity::u256_hex")]
    pub total_pool: U256,
    /// Deadline, unix seconds.
    pub deadline: u64,
    /// Whether the draft is still active.
    pub is_active: bool,
    /// Whether the user is among the winners.
    pub has_won: bool,
    /// Number of participants.
    pub participant_count: usize,
}

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of active drafts.
    pub active_drafts: usize,
    /// Sum of the active prize pools in minor units.
    #[serde(with = "quantity::u256_hex")]
    pub total_active_pool: U256,
    /// Wins of the account, if one is connected.
    pub user_wins: Option<u64>,
    /// Accumulated platform revenue in minor units.
    #[serde(with = "quantity::u256_hex")]
    pub platform_revenue: U256,
    /// Distinct participants over all drafts.
    pub unique_participants: usize,
    /// Whether the account is the contract owner.
    pub is_owner: bool,
}

/// Prize split of the top-three resolution: 60 / 25 / 15 percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrizeSplit;

impl PrizeSplit {
    /// Percentages by rank.
    pub const PERCENTAGES: [u64; 3] = [60, 25, 15];

    /// Shares of `pool` by rank, each rounded down.
    pub fn shares(pool: U256) -> [U256; 3] {
        let hundred = U256::from(100u64);
        Self::PERCENTAGES.map(|pct| {
            let pct = U256::from(pct);
            match pool.checked_mul(pct) {
                Some(scaled) => scaled / hundred,
                // pool = 100q + r
                None => pool / hundred * pct + pool % hundred * pct / hundred,
            }
        })
    }
}

/// Status badge of a draft for a given account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
pub enum DraftStatus {
    /// Deadline passed.
    Expired,
    /// The account has joined.
    Joined,
    /// Open for entries.
    Active,
}

impl DraftStatus {
    /// Compute the status at `now`.
    pub fn of(draft: &Draft, joined: bool, now: u64) -> Self {
        if draft.is_expired(now) {
            Self::Expired
        } else if joined {
            Self::Joined
        } else {
            Self::Active
        }
    }
}

/// Remaining time until `deadline`, e.g. `"5h 3m"`, `"42m"` or `"Expired"`.
pub fn time_left(deadline: u64, now: u64) -> String {
    if now > deadline {
        return "Expired".to_string();
    }
    let remaining = deadline - now;
    let hours = remaining / 3600;
    let minutes = (remaining % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Win rate in percent, rounded to one decimal place.
pub fn win_rate(wins: u64, games: u64) -> Decimal {
    if games == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(wins) * Decimal::ONE_HUNDRED / Decimal::from(games))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a minor-unit amount with two decimals, e.g. `"250.00"`.
pub fn format_amount(value: U256) -> String {
    units::format_ether_rounded(value, 2)
}
