use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    application::dto::{
        CartResponse, CartUpdateRequest, MaterializedCartResponse, SetQuantityRequest,
    },
    interface::http::problem::{ApiProblem, ApiResult},
    interface::http::products_handler::parse_uuid,
    state::AppState,
};

pub async fn create_cart(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<CartResponse>)> {
    let cart = state
        .carts
        .create_cart()
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok((StatusCode::CREATED, Json(cart)))
}

pub async fn get_cart(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> ApiResult<Json<MaterializedCartResponse>> {
    let cart_id = parse_uuid(&cid)?;
    let cart = state
        .carts
        .get_cart(cart_id)
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(cart))
}

pub async fn add_product_to_cart(
    State(state): State<AppState>,
    Path((cid, pid)): Path<(String, String)>,
) -> ApiResult<Json<CartResponse>> {
    let cart_id = parse_uuid(&cid)?;
    let product_id = parse_uuid(&pid)?;
    let cart = state
        .carts
        .add_unit(cart_id, product_id)
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(cart))
}

pub async fn update_cart(
    State(state): State<AppState>,
    Path(cid): Path<String>,
    Json(request): Json<CartUpdateRequest>,
) -> ApiResult<Json<CartResponse>> {
    let cart_id = parse_uuid(&cid)?;
    let cart = state
        .carts
        .replace_all(cart_id, request)
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(cart))
}

pub async fn update_cart_product(
    State(state): State<AppState>,
    Path((cid, pid)): Path<(String, String)>,
    Json(request): Json<SetQuantityRequest>,
) -> ApiResult<Json<CartResponse>> {
    let cart_id = parse_uuid(&cid)?;
    let product_id = parse_uuid(&pid)?;
    let cart = state
        .carts
        .set_quantity(cart_id, product_id, request)
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(cart))
}

pub async fn delete_cart_product(
    State(state): State<AppState>,
    Path((cid, pid)): Path<(String, String)>,
) -> ApiResult<Json<CartResponse>> {
    let cart_id = parse_uuid(&cid)?;
    let product_id = parse_uuid(&pid)?;
    let cart = state
        .carts
        .remove_line(cart_id, product_id)
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(cart))
}

pub async fn clear_cart(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> ApiResult<Json<CartResponse>> {
    let cart_id = parse_uuid(&cid)?;
    let cart = state
        .carts
        .clear_cart(cart_id)
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(cart))
}
