//! Call encoders and return decoders of the draft contract.

use fandraft_evm_utils::{keccak256, types::Log, Address, Bytes, H256, U256};
use serde::{Deserialize, Serialize};

use crate::{
    abi::{encode_call, Decoder, Token},
    roster::CompleteRoster,
    types::{Draft, PlayerStats},
};

/// Canonical function signatures.
pub mod signatures {
    /// `owner()`.
    pub const OWNER: &str = "owner()";
    /// `draftCounter()`.
    pub const DRAFT_COUNTER: &str = "draftCounter()";
    /// `entryFee()`.
    pub const ENTRY_FEE: &str = "entryFee()";
    /// `platformRevenue()`.
    pub const PLATFORM_REVENUE: &str = "platformRevenue()";
    /// `getDraft(uint256)`.
    pub const GET_DRAFT: &str = "getDraft(uint256)";
    /// `getDraftName(uint256)`.
    pub const GET_DRAFT_NAME: &str = "getDraftName(uint256)";
    /// `getAllDraftNames()`.
    pub const GET_ALL_DRAFT_NAMES: &str = "getAllDraftNames()";
    /// `totalWins(address)`.
    pub const TOTAL_WINS: &str = "totalWins(address)";
    /// `getParticipants(uint256)`.
    pub const GET_PARTICIPANTS: &str = "getParticipants(uint256)";
    /// `getPlayerSelection(uint256,address)`.
    pub const GET_PLAYER_SELECTION: &str = "getPlayerSelection(uint256,address)";
    /// `getDraftWinner(uint256)`.
    pub const GET_DRAFT_WINNER: &str = "getDraftWinner(uint256)";
    /// `getDraftWinners(uint256)`.
    pub const GET_DRAFT_WINNERS: &str = "getDraftWinners(uint256)";
    /// `getLeaderboard(address)`.
    pub const GET_LEADERBOARD: &str = "getLeaderboard(address)";
    /// `createDraft(string,uint256)`.
    pub const CREATE_DRAFT: &str = "createDraft(string,uint256)";
    /// `joinDraft(uint256,uint256[])`.
    pub const JOIN_DRAFT: &str = "joinDraft(uint256,uint256[])";
    /// `resolveDraft(uint256,address,uint256)`.
    pub const RESOLVE_DRAFT_SINGLE: &str = "resolveDraft(uint256,address,uint256)";
    /// `resolveDraft(uint256,address[],uint256[])`.
    pub const RESOLVE_DRAFT_TOP_THREE: &str = "resolveDraft(uint256,address[],uint256[])";
    /// `withdrawRevenue()`.
    pub const WITHDRAW_REVENUE: &str = "withdrawRevenue()";
    /// `changeEntryFee(uint256)`.
    pub const CHANGE_ENTRY_FEE: &str = "changeEntryFee(uint256)";
    /// `DraftResolved(uint256,address,uint256)` event.
    pub const DRAFT_RESOLVED: &str = "DraftResolved(uint256,address,uint256)";
}

/// Resolution ABI of the deployed contract.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(clap, derive(clap::ValueEnum))]
pub enum ResolutionAbi {
    /// `resolveDraft(uint256,address,uint256)` with a single winner.
    #[default]
    SingleWinner,
    /// `resolveDraft(uint256,address[],uint256[])` paying 60/25/15.
    TopThree,
}

impl ResolutionAbi {
    /// Number of winners (and scores) a resolution takes.
    pub fn winner_count(&self) -> usize {
        match self {
            Self::SingleWinner => 1,
            Self::TopThree => 3,
        }
    }

    /// Whether the ABI declares the `DraftResolved` event.
    pub fn has_resolved_event(&self) -> bool {
        matches!(self, Self::SingleWinner)
    }
}

/// Winner reported by a `DraftResolved` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResolved {
    /// Draft id.
    pub draft_id: u64,
    /// Winner.
    pub winner: Address,
    /// Winning score.
    #[serde(with = "fandraft_evm_utils::types::quantity::u256_hex")]
    pub score: U256,
    /// Block of the log.
    pub block_number: Option<u64>,
}

/// The draft contract at a given address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftContract {
    address: Address,
    resolution: ResolutionAbi,
}

impl DraftContract {
    /// Create.
    pub fn new(address: Address, resolution: ResolutionAbi) -> Self {
        Self {
            address,
            resolution,
        }
    }

    /// Contract address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Resolution ABI.
    pub fn resolution(&self) -> ResolutionAbi {
        self.resolution
    }

    /// Encode `owner()`.
    pub fn owner(&self) -> Bytes {
        encode_call(signatures::OWNER, &[])
    }

    /// Encode `draftCounter()`.
    pub fn draft_counter(&self) -> Bytes {
        encode_call(signatures::DRAFT_COUNTER, &[])
    }

    /// Encode `entryFee()`.
    pub fn entry_fee(&self) -> Bytes {
        encode_call(signatures::ENTRY_FEE, &[])
    }

    /// Encode `platformRevenue()`.
    pub fn platform_revenue(&self) -> Bytes {
        encode_call(signatures::PLATFORM_REVENUE, &[])
    }

    /// Encode `getDraft(id)`.
    pub fn get_draft(&self, id: u64) -> Bytes {
        encode_call(signatures::GET_DRAFT, &[id.into()])
    }

    /// Encode `getDraftName(id)`.
    pub fn get_draft_name(&self, id: u64) -> Bytes {
        encode_call(signatures::GET_DRAFT_NAME, &[id.into()])
    }

    /// Encode `getAllDraftNames()`.
    pub fn get_all_draft_names(&self) -> Bytes {
        encode_call(signatures::GET_ALL_DRAFT_NAMES, &[])
    }

    /// Encode `totalWins(address)`.
    pub fn total_wins(&self, address: &Address) -> Bytes {
        encode_call(signatures::TOTAL_WINS, &[(*address).into()])
    }

    /// Encode `getParticipants(id)`.
    pub fn get_participants(&self, id: u64) -> Bytes {
        encode_call(signatures::GET_PARTICIPANTS, &[id.into()])
    }

    /// Encode `getPlayerSelection(id, user)`.
    pub fn get_player_selection(&self, id: u64, user: &Address) -> Bytes {
        encode_call(
            signatures::GET_PLAYER_SELECTION,
            &[id.into(), (*user).into()],
        )
    }

    /// Encode the winner query matching the resolution ABI.
    pub fn get_winners(&self, id: u64) -> Bytes {
        let signature = match self.resolution {
            ResolutionAbi::SingleWinner => signatures::GET_DRAFT_WINNER,
            ResolutionAbi::TopThree => signatures::GET_DRAFT_WINNERS,
        };
        encode_call(signature, &[id.into()])
    }

    /// Encode `getLeaderboard(address)`.
    pub fn get_leaderboard(&self, player: &Address) -> Bytes {
        encode_call(signatures::GET_LEADERBOARD, &[(*player).into()])
    }

    /// Encode `createDraft(name, durationSeconds)`.
    pub fn create_draft(&self, name: &str, duration_seconds: u64) -> Bytes {
        encode_call(
            signatures::CREATE_DRAFT,
            &[Token::String(name.to_string()), duration_seconds.into()],
        )
    }

    /// Encode `joinDraft(id, players)`.
    pub fn join_draft(&self, id: u64, roster: &CompleteRoster) -> Bytes {
        let players = roster
            .player_ids()
            .iter()
            .map(|id| U256::from(*id))
            .collect();
        encode_call(
            signatures::JOIN_DRAFT,
            &[id.into(), Token::UintArray(players)],
        )
    }

    /// Encode `resolveDraft` in the configured variant.
    ///
    /// Winner and score counts must match [`ResolutionAbi::winner_count`].
    pub fn resolve_draft(
        &self,
        id: u64,
        winners: &[Address],
        scores: &[U256],
    ) -> crate::Result<Bytes> {
        let expected = self.resolution.winner_count();
        if winners.len() != expected || scores.len() != expected {
            return Err(crate::Error::validation(format!(
                "{} resolution takes exactly {expected} winner(s) and {expected} score(s), got {} and {}",
                self.resolution,
                winners.len(),
                scores.len()
            )));
        }
        let data = match self.resolution {
            ResolutionAbi::SingleWinner => encode_call(
                signatures::RESOLVE_DRAFT_SINGLE,
                &[id.into(), winners[0].into(), scores[0].into()],
            ),
            ResolutionAbi::TopThree => encode_call(
                signatures::RESOLVE_DRAFT_TOP_THREE,
                &[
                    id.into(),
                    Token::AddressArray(winners.to_vec()),
                    Token::UintArray(scores.to_vec()),
                ],
            ),
        };
        Ok(data)
    }

    /// Encode `withdrawRevenue()`.
    pub fn withdraw_revenue(&self) -> Bytes {
        encode_call(signatures::WITHDRAW_REVENUE, &[])
    }

    /// Encode `changeEntryFee(fee)`.
    pub fn change_entry_fee(&self, fee: U256) -> Bytes {
        encode_call(signatures::CHANGE_ENTRY_FEE, &[fee.into()])
    }

    /// Topic of the `DraftResolved` event, if the ABI declares it.
    pub fn draft_resolved_topic(&self) -> Option<H256> {
        self.resolution
            .has_resolved_event()
            .then(|| keccak256(signatures::DRAFT_RESOLVED))
    }

    /// Decode the winners returned by [`get_winners`](Self::get_winners).
    /// The zero address means no winner yet.
    pub fn decode_winners(&self, data: &[u8]) -> crate::Result<Vec<Address>> {
        let winners = match self.resolution {
            ResolutionAbi::SingleWinner => vec![decode_address(data)?],
            ResolutionAbi::TopThree => decode_address_array(data)?,
        };
        Ok(winners.into_iter().filter(|w| !w.is_zero()).collect())
    }

    /// Decode a `DraftResolved` log.
    pub fn decode_draft_resolved(&self, log: &Log) -> crate::Result<DraftResolved> {
        let topic = self.draft_resolved_topic().ok_or_else(|| {
            crate::Error::abi(format!(
                "the {} resolution ABI declares no DraftResolved event",
                self.resolution
            ))
        })?;
        if log.topics.first() != Some(&topic) {
            return Err(crate::Error::abi("log is not a DraftResolved event"));
        }
        let draft_id = log
            .topics
            .get(1)
            .ok_or_else(|| crate::Error::abi("missing indexed draft id"))?;
        let draft_id = Decoder::new(draft_id.as_bytes()).u64(0)?;
        let decoder = Decoder::new(log.data.as_slice());
        decoder.expect_words(2)?;
        Ok(DraftResolved {
            draft_id,
            winner: decoder.address(0)?,
            score: decoder.uint(1)?,
            block_number: log.block_number,
        })
    }
}

/// Decode a single `uint256`.
pub fn decode_uint(data: &[u8]) -> crate::Result<U256> {
    let decoder = Decoder::new(data);
    decoder.expect_words(1)?;
    decoder.uint(0)
}

/// Decode a single `uint256` that must fit in a `u64`.
pub fn decode_u64(data: &[u8]) -> crate::Result<u64> {
    let decoder = Decoder::new(data);
    decoder.expect_words(1)?;
    decoder.u64(0)
}

/// Decode a single `address`.
pub fn decode_address(data: &[u8]) -> crate::Result<Address> {
    let decoder = Decoder::new(data);
    decoder.expect_words(1)?;
    decoder.address(0)
}

/// Decode a single `address[]`.
pub fn decode_address_array(data: &[u8]) -> crate::Result<Vec<Address>> {
    Decoder::new(data).address_array(0)
}

/// Decode a single `uint256[]` of ids.
pub fn decode_id_array(data: &[u8]) -> crate::Result<Vec<u64>> {
    Decoder::new(data)
        .uint_array(0)?
        .into_iter()
        .map(|id| {
            u64::try_from(id).map_err(|_| crate::Error::abi(format!("id {id} does not fit in u64")))
        })
        .collect()
}

/// Decode a single `string`.
pub fn decode_string(data: &[u8]) -> crate::Result<String> {
    Decoder::new(data).string(0)
}

/// Decode a single `string[]`.
pub fn decode_string_array(data: &[u8]) -> crate::Result<Vec<String>> {
    Decoder::new(data).string_array(0)
}

/// Decode the `(id, isActive, totalPool, deadline)` tuple of `getDraft`.
pub fn decode_draft(data: &[u8]) -> crate::Result<Draft> {
    let decoder = Decoder::new(data);
    decoder.expect_words(4)?;
    Ok(Draft {
        id: decoder.u64(0)?,
        name: None,
        is_active: decoder.bool(1)?,
        total_pool: decoder.uint(2)?,
        deadline: decoder.u64(3)?,
    })
}

/// Decode the `(totalGames, wins, totalWinnings, winRate)` tuple of `getLeaderboard`.
pub fn decode_player_stats(data: &[u8]) -> crate::Result<PlayerStats> {
    let decoder = Decoder::new(data);
    decoder.expect_words(4)?;
    Ok(PlayerStats {
        total_games: decoder.u64(0)?,
        wins: decoder.u64(1)?,
        total_winnings: decoder.uint(2)?,
        win_rate: decoder.u64(3)?,
    })
}
