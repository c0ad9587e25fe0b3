//! Seed data loaded by [`MemStorage::seeded`](crate::storage::MemStorage::seeded).

use fandraft_sdk::{
    api::{LeaderboardUpdate, NewDraft, NewPlayer},
    types::Position,
};
use time::{Duration, OffsetDateTime};

const CATALOG: &[(&str, &str, Position, i64)] = &[
    ("Marco Ferrante", "Porto Azzurro", Position::Goalkeeper, 142),
    ("Lukas Brenner", "Rheinstadt", Position::Goalkeeper, 128),
    ("Iker Salazar", "Real Costa", Position::Goalkeeper, 117),
    ("Tomás Vidal", "Real Costa", Position::Defender, 156),
    ("Kwame Mensah", "Northbridge", Position::Defender, 149),
    ("Jonas Lindqvist", "Rheinstadt", Position::Defender, 138),
    ("Rafael Nunes", "Porto Azzurro", Position::Defender, 133),
    ("Oliver Hart", "Northbridge", Position::Defender, 121),
    ("Émile Laurent", "Olympique Sud", Position::Defender, 115),
    ("Dario Conti", "Porto Azzurro", Position::Defender, 109),
    ("Samir Haddad", "Olympique Sud", Position::Defender, 102),
    ("Leo Castell", "Real Costa", Position::Midfielder, 188),
    ("Finn O'Rourke", "Northbridge", Position::Midfielder, 174),
    ("Matteo Greco", "Porto Azzurro", Position::Midfielder, 169),
    ("Yusuf Demir", "Rheinstadt", Position::Midfielder, 152),
    ("Adrien Moreau", "Olympique Sud", Position::Midfielder, 147),
    ("Pablo Ortega", "Real Costa", Position::Midfielder, 139),
    ("Niklas Weber", "Rheinstadt", Position::Midfielder, 126),
    ("Diego Ramos", "Real Costa", Position::Forward, 201),
    ("Callum Reid", "Northbridge", Position::Forward, 187),
    ("Andrea Bellini", "Porto Azzurro", Position::Forward, 176),
    ("Karim Benali", "Olympique Sud", Position::Forward, 164),
    ("Erik Sandberg", "Rheinstadt", Position::Forward, 151),
    ("Bruno Carvalho", "Porto Azzurro", Position::Forward, 140),
];

/// The player catalog.
pub fn players() -> Vec<NewPlayer> {
    CATALOG
        .iter()
        .map(|(name, team, position, points)| NewPlayer {
            name: name.to_string(),
            team: team.to_string(),
            position: *position,
            points: Some(*points),
            image_url: None,
        })
        .collect()
}

/// Three open drafts with deadlines relative to `now`.
pub fn drafts(now: OffsetDateTime) -> Vec<NewDraft> {
    let draft = |contract_id, name: &str, description: &str, hours, pool: &str, participants, max| {
        NewDraft {
            contract_id,
            name: name.to_string(),
            description: Some(description.to_string()),
            entry_fee: "25".to_string(),
            deadline: now + Duration::hours(hours),
            is_active: Some(true),
            total_pool: Some(pool.to_string()),
            participants: Some(participants),
            max_participants: Some(max),
        }
    };
    vec![
        draft(
            1,
            "Champions League Fantasy",
            "Pick your dream team for the Champions League knockout stage",
            24,
            "250",
            10,
            100,
        ),
        draft(
            2,
            "Premier League Elite",
            "Elite fantasy league for Premier League matchday",
            48,
            "500",
            20,
            100,
        ),
        draft(
            3,
            "Weekend Warriors",
            "Quick draft for weekend matches",
            12,
            "150",
            6,
            50,
        ),
    ]
}

/// Sample leaderboard rows. Addresses are kept verbatim, even malformed ones.
pub fn leaderboard() -> Vec<LeaderboardUpdate> {
    [
        ("0x742d35Cc6634C0532925a3b8d8f89c7C7b265f9e", 15, "1250", 28),
        ("0x8ba1f109551bD432803012645Hac136c22C3B8C2", 12, "980", 25),
        ("0x123456789abcdef123456789abcdef123456789a", 10, "750", 22),
        ("0x987654321fedcba987654321fedcba987654321f", 8, "600", 18),
        ("0xabcdef123456789abcdef123456789abcdef123456", 6, "450", 15),
    ]
    .into_iter()
    .map(|(address, wins, earnings, games)| LeaderboardUpdate {
        user_address: Some(address.to_string()),
        total_wins: Some(wins),
        total_earnings: Some(earnings.to_string()),
        games_played: Some(games),
    })
    .collect()
}
