use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument};

use crate::{
    donations::dto::{DonationItem, DonationsQuery},
    error::ApiError,
    state::AppState,
};

pub fn donation_routes() -> Router<AppState> {
    Router::new().route("/donations", get(list_donations))
}

fn parse_user_id(q: &DonationsQuery) -> Result<i64, ApiError> {
    let raw = q
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("user_id is required"))?;
    raw.parse::<i64>()
        .map_err(|_| ApiError::validation("user_id must be an integer"))
}

/// GET /api/donations?user_id=<id>
#[instrument(skip(state))]
pub async fn list_donations(
    State(state): State<AppState>,
    Query(q): Query<DonationsQuery>,
) -> Result<Json<Vec<DonationItem>>, ApiError> {
    let user_id = parse_user_id(&q)?;
    let rows = state.donations.list_by_user(user_id).await?;
    debug!(user_id, count = rows.len(), "donations listed");
    Ok(Json(rows.into_iter().map(DonationItem::from).collect()))
}
