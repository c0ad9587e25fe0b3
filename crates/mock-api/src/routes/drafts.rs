//! Draft and entry endpoints.

use std::sync::Arc;

use fandraft_sdk::api::{DraftRecord, EntryRecord, NewDraft, NewEntry};
use poem::{
    handler,
    web::{Data, Json, Path},
};

use super::parse_id;
use crate::{
    error::{ApiError, ApiResult, StorageResultExt},
    storage::MemStorage,
};

/// `GET /api/drafts`
#[handler]
pub async fn list(Data(storage): Data<&Arc<MemStorage>>) -> ApiResult<Json<Vec<DraftRecord>>> {
    Ok(Json(storage.drafts().or_internal("Failed to fetch drafts")?))
}

/// `GET /api/drafts/active`
#[handler]
pub async fn active(Data(storage): Data<&Arc<MemStorage>>) -> ApiResult<Json<Vec<DraftRecord>>> {
    Ok(Json(
        storage
            .active_drafts()
            .or_internal("Failed to fetch active drafts")?,
    ))
}

/// `GET /api/drafts/:id`
#[handler]
pub async fn show(
    Data(storage): Data<&Arc<MemStorage>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DraftRecord>> {
    let Some(id) = parse_id(&id) else {
        return Err(ApiError::NotFound("Draft not found"));
    };
    storage
        .draft(id)
        .or_internal("Failed to fetch draft")?
        .map(Json)
        .ok_or(ApiError::NotFound("Draft not found"))
}

/// `POST /api/drafts`
#[handler]
pub async fn create(
    Data(storage): Data<&Arc<MemStorage>>,
    body: Vec<u8>,
) -> ApiResult<Json<DraftRecord>> {
    let draft: NewDraft =
        serde_json::from_slice(&body).map_err(|_| ApiError::BadRequest("Invalid draft data"))?;
    if draft.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Invalid draft data"));
    }
    let draft = storage
        .create_draft(draft)
        .map_err(|_| ApiError::BadRequest("Invalid draft data"))?;
    tracing::info!(id = draft.id, contract_id = draft.contract_id, "draft created");
    Ok(Json(draft))
}

/// `GET /api/drafts/:id/entries`
#[handler]
pub async fn entries(
    Data(storage): Data<&Arc<MemStorage>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<EntryRecord>>> {
    let Some(id) = parse_id(&id) else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(
        storage
            .entries(id)
            .or_internal("Failed to fetch draft entries")?,
    ))
}

/// `POST /api/drafts/:id/entries`
///
/// A second entry for the same draft and address is rejected with 400.
#[handler]
pub async fn create_entry(
    Data(storage): Data<&Arc<MemStorage>>,
    Path(id): Path<String>,
    body: Vec<u8>,
) -> ApiResult<Json<EntryRecord>> {
    const INVALID: ApiError = ApiError::BadRequest("Invalid draft entry data");

    let id = parse_id(&id).ok_or(INVALID)?;
    let entry: NewEntry = serde_json::from_slice(&body).map_err(|_| INVALID)?;
    if entry.user_address.trim().is_empty() {
        return Err(INVALID);
    }
    let entry = storage
        .create_entry(id, entry)
        .map_err(|_| INVALID)?
        .ok_or(ApiError::BadRequest(
            "User already has an entry for this draft",
        ))?;
    tracing::info!(draft = id, user = %entry.user_address, "entry created");
    Ok(Json(entry))
}

/// `GET /api/drafts/:id/entries/:user_address`
#[handler]
pub async fn user_entry(
    Data(storage): Data<&Arc<MemStorage>>,
    Path((id, user_address)): Path<(String, String)>,
) -> ApiResult<Json<EntryRecord>> {
    let Some(id) = parse_id(&id) else {
        return Err(ApiError::NotFound("Entry not found"));
    };
    storage
        .entry(id, &user_address)
        .or_internal("Failed to fetch draft entry")?
        .map(Json)
        .ok_or(ApiError::NotFound("Entry not found"))
}
