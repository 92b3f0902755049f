use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    application::dto::{
        CreateProductRequest, HealthResponse, ProductListQueryRequest, ProductListResponse,
        ProductResponse,
    },
    domain::errors::DomainError,
    interface::http::problem::{ApiProblem, ApiResult},
    state::AppState,
};

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductResponse>)> {
    let created = state
        .catalog
        .create_product(request)
        .await
        .map_err(ApiProblem::from_domain)?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> ApiResult<Json<ProductResponse>> {
    let product_id = parse_uuid(&pid)?;
    let product = state
        .catalog
        .get_product(product_id)
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(product))
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQueryRequest>,
) -> ApiResult<Json<ProductListResponse>> {
    let products = state
        .catalog
        .list_products(query)
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(products))
}

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let categories = state
        .catalog
        .categories()
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(categories))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let product_id = parse_uuid(&pid)?;
    state
        .catalog
        .delete_product(product_id)
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(serde_json::json!({ "message": "product deleted" })))
}

pub(crate) fn parse_uuid(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiProblem::from_domain(DomainError::validation("id must be a valid UUID string"))
    })
}
