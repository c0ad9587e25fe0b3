//! Player catalog endpoints.

use std::sync::Arc;

use fandraft_sdk::{api::NewPlayer, types::Player};
use poem::{
    handler,
    web::{Data, Json, Path},
};

use crate::{
    error::{ApiError, ApiResult, StorageResultExt},
    storage::MemStorage,
};

/// `GET /api/players`
#[handler]
pub async fn list(Data(storage): Data<&Arc<MemStorage>>) -> ApiResult<Json<Vec<Player>>> {
    let players = storage.players().or_internal("Failed to fetch players")?;
    Ok(Json(players))
}

/// `GET /api/players/position/:position`, exact position code match.
#[handler]
pub async fn by_position(
    Data(storage): Data<&Arc<MemStorage>>,
    Path(position): Path<String>,
) -> ApiResult<Json<Vec<Player>>> {
    let players = storage
        .players_by_position(&position)
        .or_internal("Failed to fetch players by position")?;
    Ok(Json(players))
}

/// `POST /api/players`
#[handler]
pub async fn create(
    Data(storage): Data<&Arc<MemStorage>>,
    body: Vec<u8>,
) -> ApiResult<Json<Player>> {
    let player: NewPlayer =
        serde_json::from_slice(&body).map_err(|_| ApiError::BadRequest("Invalid player data"))?;
    let player = storage
        .create_player(player)
        .map_err(|_| ApiError::BadRequest("Invalid player data"))?;
    tracing::info!(id = player.id, name = %player.name, "player created");
    Ok(Json(player))
}
