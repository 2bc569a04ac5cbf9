//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::directory::sync_directory;
use crate::domain::UserPosition;
use crate::ocm::OcmError;
use crate::proximity::rank;

use super::dto::*;
use super::state::AppState;

/// Upper bound on the nearby result limit a client may request.
const MAX_NEARBY_LIMIT: usize = 50;

/// Create the application router.
///
/// The API is consumed cross-origin by the map frontend, so CORS is
/// permissive.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/chargers", get(list_chargers))
        .route("/api/chargers/nearby", get(nearby_chargers))
        .route("/api/position", post(report_position))
        .route("/api/sync", post(run_sync))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List chargers, optionally filtered by town.
async fn list_chargers(
    State(state): State<AppState>,
    Query(query): Query<ListChargersQuery>,
) -> Json<ChargerListResponse> {
    let chargers = match query.town.as_deref() {
        Some(town) => state
            .directory
            .by_town(town)
            .await
            .iter()
            .map(ChargerView::from_station)
            .collect(),
        None => state
            .directory
            .snapshot()
            .await
            .iter()
            .map(ChargerView::from_station)
            .collect(),
    };

    Json(ChargerListResponse { chargers })
}

/// Rank chargers by distance from a position.
///
/// The reference position is either explicit (`lat`/`lon` query
/// parameters) or the last fix reported to `/api/position`. With neither,
/// the ranking is empty and `located` is false so the caller can show "no
/// location yet" rather than "no chargers".
async fn nearby_chargers(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyResponse>, AppError> {
    let position = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => {
            validate_coordinates(lat, lon)?;
            Some(UserPosition::new(lat, lon, 0.0))
        }
        (None, None) => state.tracker.read().await.position(),
        _ => {
            return Err(AppError::BadRequest {
                message: "lat and lon must be provided together".to_string(),
            });
        }
    };

    let limit = query
        .limit
        .unwrap_or(state.tracker.read().await.limit())
        .min(MAX_NEARBY_LIMIT);

    let stations = state.directory.snapshot().await;
    let ranked = rank(position.as_ref(), &stations, limit);

    Ok(Json(NearbyResponse {
        located: position.is_some(),
        chargers: ranked.iter().map(NearbyEntry::from_ranked).collect(),
    }))
}

/// Accept a geolocation fix from the frontend.
///
/// The fix goes onto the feed; the tracker picks it up through its
/// subscription. The response reports which geofences the fix falls
/// inside.
async fn report_position(
    State(state): State<AppState>,
    Json(request): Json<PositionRequest>,
) -> Result<Json<PositionResponse>, AppError> {
    validate_coordinates(request.latitude, request.longitude)?;

    let position = UserPosition::new(
        request.latitude,
        request.longitude,
        request.accuracy.unwrap_or(0.0),
    );

    state.feed.publish(position);

    let geofences = state
        .geofences
        .iter()
        .filter(|fence| fence.contains(&position))
        .map(|fence| fence.name.clone())
        .collect();

    Ok(Json(PositionResponse { geofences }))
}

/// Refresh the directory from the registry.
async fn run_sync(State(state): State<AppState>) -> Result<Json<SyncResponse>, AppError> {
    // A manual sync should see live data, not a cached response.
    state.ocm.invalidate_cache();

    let outcome = sync_directory(state.ocm.as_ref(), &state.directory, &state.sync_config)
        .await
        .map_err(AppError::from)?;

    Ok(Json(SyncResponse {
        message: "OCM data synced".to_string(),
        synced: outcome.synced,
        deleted: outcome.removed,
    }))
}

/// Reject coordinates outside the valid degree ranges.
fn validate_coordinates(lat: f64, lon: f64) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::BadRequest {
            message: format!("latitude out of range: {lat}"),
        });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::BadRequest {
            message: format!("longitude out of range: {lon}"),
        });
    }
    Ok(())
}

/// Application-level errors that map to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<OcmError> for AppError {
    fn from(e: OcmError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
