//! Route handlers.

pub mod drafts;
pub mod leaderboard;
pub mod players;
pub mod stats;

use std::sync::Arc;

use poem::{get, Endpoint, EndpointExt, Route};

use crate::storage::MemStorage;

/// Create the API router.
pub fn create_router(storage: Arc<MemStorage>) -> impl Endpoint {
    Route::new()
        // Players
        .at("/api/players", get(players::list).post(players::create))
        .at("/api/players/position/:position", get(players::by_position))
        // Drafts
        .at("/api/drafts", get(drafts::list).post(drafts::create))
        .at("/api/drafts/active", get(drafts::active))
        .at("/api/drafts/:id", get(drafts::show))
        .at(
            "/api/drafts/:id/entries",
            get(drafts::entries).post(drafts::create_entry),
        )
        .at("/api/drafts/:id/entries/:user_address", get(drafts::user_entry))
        // Leaderboard and stats
        .at(
            "/api/leaderboard",
            get(leaderboard::top).post(leaderboard::update),
        )
        .at("/api/stats", get(stats::platform))
        .data(storage)
}

/// Parse a numeric path id. Anything else names no record.
pub(crate) fn parse_id(id: &str) -> Option<u64> {
    id.trim().parse().ok()
}
