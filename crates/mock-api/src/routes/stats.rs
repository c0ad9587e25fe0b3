use std::sync::Arc;

use fandraft_sdk::api::PlatformStats;
use poem::{
    handler,
    web::{Data, Json},
};

use crate::{
    error::{ApiResult, StorageResultExt},
    storage::MemStorage,
};

/// `GET /api/stats`
#[handler]
pub async fn platform(Data(storage): Data<&Arc<MemStorage>>) -> ApiResult<Json<PlatformStats>> {
    Ok(Json(storage.stats().or_internal("Failed to fetch stats")?))
}
