//! Leaderboard endpoints.

use std::sync::Arc;

use fandraft_sdk::api::{LeaderboardRecord, LeaderboardUpdate};
use poem::{
    handler,
    web::{Data, Json},
};

use crate::{
    error::{ApiError, ApiResult, StorageResultExt},
    storage::MemStorage,
};

/// `GET /api/leaderboard`, the top rows by wins.
#[handler]
pub async fn top(Data(storage): Data<&Arc<MemStorage>>) -> ApiResult<Json<Vec<LeaderboardRecord>>> {
    Ok(Json(
        storage
            .leaderboard()
            .or_internal("Failed to fetch leaderboard")?,
    ))
}

/// `POST /api/leaderboard`, upsert by address.
///
/// Zero or missing fields keep the stored values.
#[handler]
pub async fn update(
    Data(storage): Data<&Arc<MemStorage>>,
    body: Vec<u8>,
) -> ApiResult<Json<LeaderboardRecord>> {
    let update: LeaderboardUpdate = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid leaderboard data"))?;
    let Some(user_address) = update.user_address.clone().filter(|a| !a.is_empty()) else {
        return Err(ApiError::BadRequest("User address is required"));
    };
    let record = storage
        .update_leaderboard(user_address, update)
        .map_err(|_| ApiError::BadRequest("Invalid leaderboard data"))?;
    Ok(Json(record))
}
