use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::Extension;
use bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{NewBid, PlaceBid};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BidQuery {
    pub buyer_email: Option<String>,
}

/// GET /bids - list the caller's bids, bid price descending.
///
/// A supplied buyer_email that differs from the authenticated identity is
/// rejected with 403; when omitted (or empty) the filter defaults to the
/// caller's own email.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<BidQuery>,
) -> Result<Json<Value>, ApiError> {
    let requested = query.buyer_email.as_deref().filter(|s| !s.is_empty());
    if let Some(requested) = requested {
        if requested != user.email {
            return Err(ApiError::forbidden(
                "Forbidden: Cannot view other users' bids",
            ));
        }
    }

    let buyer = requested.unwrap_or(user.email.as_str());
    let bids = state.store.bids_for_buyer(buyer).await?;
    Ok(Json(json!({ "success": true, "data": bids })))
}

/// POST /bids - place a bid as the authenticated buyer.
///
/// Buyer identity fields always come from the verified token; anything the
/// client sends for them never reaches the store.
pub async fn place(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<PlaceBid>,
) -> Result<Json<Value>, ApiError> {
    let bid = NewBid {
        product: body.product,
        bid_price: body.bid_price,
        buyer_email: user.email,
        buyer_name: user.display_name,
        created_at: chrono::Utc::now(),
    };

    let id = state.store.insert_bid(&bid).await?;
    Ok(Json(json!({ "success": true, "data": { "id": id } })))
}

/// DELETE /bids/:id - delete one of the caller's own bids.
///
/// The delete filter pairs the id with the caller's email, so an absent id
/// and another buyer's bid are indistinguishable 404s.
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let oid =
        ObjectId::parse_str(&id).map_err(|_| ApiError::invalid_id("Invalid Bid ID format"))?;

    let deleted = state.store.delete_bid(&oid, &user.email).await?;
    if deleted == 0 {
        return Err(ApiError::not_found_or_not_owned(
            "Bid not found or not owned by user",
        ));
    }

    Ok(Json(json!({ "success": true, "data": { "deleted": deleted } })))
}
