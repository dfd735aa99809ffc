use axum::extract::{Path, Query, State};
use axum::response::Json;
use bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::CreateProduct;
use crate::state::AppState;

/// Cap for the unsorted "latest" sample.
const LATEST_PRODUCTS_LIMIT: i64 = 6;
/// Cap for the full listing. Note the asymmetry: this route sorts ascending
/// by creation time while /latest-products applies no sort at all. Inherited
/// behavior, kept until product requirements say otherwise.
const ALL_PRODUCTS_LIMIT: i64 = 21;

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    /// Exact-match filter on the owning email.
    pub email: Option<String>,
}

/// GET /products - list products, optionally filtered by owner email
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Value>, ApiError> {
    let products = state.store.list_products(query.email.as_deref()).await?;
    Ok(Json(json!({ "success": true, "data": products })))
}

/// GET /latest-products - fixed-size sample in store-default order
pub async fn latest(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let products = state.store.latest_products(LATEST_PRODUCTS_LIMIT).await?;
    Ok(Json(json!({ "success": true, "data": products })))
}

/// GET /all-products - fixed-size listing, ascending by creation time
pub async fn all(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let products = state.store.all_products(ALL_PRODUCTS_LIMIT).await?;
    Ok(Json(json!({ "success": true, "data": products })))
}

/// GET /products/:id - single product lookup
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let oid = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::invalid_id("Invalid product ID format"))?;

    match state.store.product(&oid).await? {
        Some(product) => Ok(Json(json!({ "success": true, "data": product }))),
        None => Err(ApiError::not_found("Product not found")),
    }
}

/// POST /products - open write; the server stamps the creation time
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProduct>,
) -> Result<Json<Value>, ApiError> {
    let product = body.into_new(chrono::Utc::now());
    let id = state.store.insert_product(&product).await?;
    Ok(Json(json!({ "success": true, "data": { "id": id } })))
}

/// GET /products/bids/:product_id - bids on one product, highest price first
pub async fn bids(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let bids = state.store.bids_for_product(&product_id).await?;
    Ok(Json(json!({ "success": true, "data": bids })))
}
