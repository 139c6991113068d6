use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::{InventoryError, Item, NewItem},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_items(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<(StatusCode, Json<Vec<Item>>)> {
    let Path(bin_id) = path?;
    let items = state.store.read(|c| Ok(c.bin(bin_id)?.items.clone())).await?;

    info!(bin_id, count = items.len(), "Listed items");

    Ok((StatusCode::OK, Json(items)))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let Path((bin_id, item_id)) = path?;
    let item = state
        .store
        .read(|c| c.bin(bin_id)?.get_item(item_id).cloned())
        .await?;

    info!(bin_id, item_id, "Fetched item");

    Ok((StatusCode::OK, Json(item)))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_item(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Option<NewItem>>, JsonRejection>,
) -> AppResult<(StatusCode, Json<i32>)> {
    let Path(bin_id) = path?;
    let Json(payload) = payload?;
    let item = payload
        .ok_or_else(|| AppError::BadRequest("item payload is required".to_string()))?
        .into_item()?;
    let item_id = item.id;

    state
        .store
        .write(move |c| c.bin_mut(bin_id)?.add_item(item))
        .await?;

    info!(bin_id, item_id, "Created item");

    Ok((StatusCode::CREATED, Json(item_id)))
}

// ── Adjust quantity ───────────────────────────────────────────────────────────

/// Sets the on-hand quantity to `new_count`. This overwrites the count; it
/// does not subtract from it.
pub async fn adjust_item_count(
    State(state): State<AppState>,
    path: Result<Path<(i32, i32, i32)>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path((bin_id, item_id, new_count)) = path?;
    // Before the lookup, so an unknown bin with a negative count is still a 400.
    if new_count < 0 {
        return Err(InventoryError::InvalidQuantity(new_count).into());
    }

    state
        .store
        .write(|c| c.bin_mut(bin_id)?.adjust_item_count(item_id, new_count))
        .await?;

    info!(bin_id, item_id, quantity = new_count, "Adjusted item count");

    Ok(StatusCode::OK)
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_item(
    State(state): State<AppState>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path((bin_id, item_id)) = path?;
    let removed = state
        .store
        .write(|c| c.bin_mut(bin_id)?.remove_item(item_id))
        .await?;

    info!(bin_id, item_id, description = %removed.description, "Deleted item");

    Ok(StatusCode::NO_CONTENT)
}
