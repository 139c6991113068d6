use std::time::Instant;

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
    models::{Bin, NewBin},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_bins(State(state): State<AppState>) -> AppResult<(StatusCode, Json<Vec<Bin>>)> {
    let start = Instant::now();
    let bins = state
        .store
        .read(|c| Ok(c.list_bins().cloned().collect::<Vec<_>>()))
        .await?;

    info!(
        count = bins.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed bins"
    );

    Ok((StatusCode::OK, Json(bins)))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_bin(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<(StatusCode, Json<Bin>)> {
    let Path(bin_id) = path?;
    let bin = state.store.read(|c| c.bin(bin_id).cloned()).await?;

    info!(bin_id, items = bin.items.len(), "Fetched bin");

    Ok((StatusCode::OK, Json(bin)))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_bin(
    State(state): State<AppState>,
    payload: Result<Json<Option<NewBin>>, JsonRejection>,
) -> AppResult<(StatusCode, Json<i32>)> {
    let Json(payload) = payload?;
    let bin = payload
        .ok_or_else(|| AppError::BadRequest("bin payload is required".to_string()))?
        .into_bin()?;
    let bin_id = bin.id;
    let item_count = bin.items.len();

    state.store.write(move |c| c.insert_bin(bin)).await?;

    info!(bin_id, items = item_count, "Created bin");

    Ok((StatusCode::CREATED, Json(bin_id)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::super::test_support::*;
    use crate::models::{Bin, Item};
    use crate::store::Durability;

    #[tokio::test]
    async fn list_returns_seed_bins_in_order() {
        let app = app(Durability::Durable);
        let (status, bins): (_, Vec<Bin>) = send_json(&app, get("/api/bins")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(bins.len(), 2);
        assert_eq!((bins[0].id, bins[0].description.as_str()), (1, "Warehouse A"));
        assert_eq!(bins[0].items.len(), 2);
        assert_eq!((bins[1].id, bins[1].description.as_str()), (2, "Warehouse B"));
        assert_eq!(bins[1].items.len(), 2);
    }

    #[tokio::test]
    async fn get_known_bin() {
        let app = app(Durability::Durable);
        let (status, bin): (_, Bin) = send_json(&app, get("/api/bins/1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(bin.id, 1);
        assert_eq!(bin.description, "Warehouse A");
        assert_eq!(bin.items.len(), 2);
    }

    #[tokio::test]
    async fn get_unknown_bin_is_404() {
        let app = app(Durability::Durable);
        let (status, body) = send(&app, get("/api/bins/9")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Bin 9 not found");
    }

    #[tokio::test]
    async fn non_numeric_bin_id_is_400() {
        let app = app(Durability::Durable);
        let (status, body) = send(&app, get("/api/bins/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("abc"), "body {}", body);
    }

    #[tokio::test]
    async fn out_of_range_bin_id_is_400_with_json_error() {
        let app = app(Durability::Durable);
        let (status, body) = send(&app, get("/api/bins/99999999999")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string(), "body {}", body);
    }

    #[tokio::test]
    async fn create_then_fetch_round_trips() {
        let app = app(Durability::Durable);
        let payload = json!({
            "id": 3,
            "description": "Warehouse C",
            "items": [{ "id": 5, "description": "Wrench", "quantity": 4 }]
        });

        let (status, id): (_, i32) = send_json(&app, post("/api/bins", &payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(id, 3);

        let (status, bin): (_, Bin) = send_json(&app, get("/api/bins/3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bin, Bin::new(3, "Warehouse C", vec![Item::new(5, "Wrench", 4)]));

        let (_, bins): (_, Vec<Bin>) = send_json(&app, get("/api/bins")).await;
        let ids: Vec<i32> = bins.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn create_duplicate_is_409_and_keeps_existing() {
        let app = app(Durability::Durable);
        let payload = json!({ "id": 1, "description": "Impostor", "items": [] });

        let (status, _) = send(&app, post("/api/bins", &payload)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, bin): (_, Bin) = send_json(&app, get("/api/bins/1")).await;
        assert_eq!(bin.description, "Warehouse A");
        assert_eq!(bin.items.len(), 2);
    }

    #[tokio::test]
    async fn create_invalid_payloads_are_400() {
        let app = app(Durability::Durable);
        let payloads = [
            json!(null),
            json!({ "id": 0, "description": "Zero", "items": [] }),
            json!({ "id": 4, "description": "", "items": [] }),
            json!({ "id": 4, "description": "No items" }),
            json!({ "description": "No id", "items": [] }),
            json!({ "id": 4, "description": "Bad item", "items": [{ "id": 1, "description": "x", "quantity": -1 }] }),
            json!({ "id": "four", "description": "Wrong type", "items": [] }),
        ];

        for payload in payloads {
            let (status, _) = send(&app, post("/api/bins", &payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        }

        let (status, _) = send(&app, raw_post("/api/bins", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, bins): (_, Vec<Bin>) = send_json(&app, get("/api/bins")).await;
        assert_eq!(bins.len(), 2, "rejected payloads never reach the store");
    }

    #[tokio::test]
    async fn reset_mode_forgets_created_bin() {
        let app = app(Durability::SeedResetPerRead);
        let payload = json!({ "id": 3, "description": "Warehouse C", "items": [] });

        let (status, id): (_, i32) = send_json(&app, post("/api/bins", &payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(id, 3);

        let (status, _) = send(&app, get("/api/bins/3")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
