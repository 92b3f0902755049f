use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use tienda_api::{
    application::{cart_service::CartService, catalog_service::CatalogService},
    build_router,
    infrastructure::{
        ProductRepository, in_memory_cart_repository::InMemoryCartRepository,
        in_memory_product_repository::InMemoryProductRepository,
        notifications::EventBroadcaster,
    },
    state::AppState,
};

pub fn build_app() -> Router {
    let products: Arc<dyn ProductRepository> = Arc::new(InMemoryProductRepository::new());
    let carts = Arc::new(InMemoryCartRepository::new());
    let events = Arc::new(EventBroadcaster::new(16));

    let catalog = Arc::new(CatalogService::new(products.clone(), events.clone()));
    let cart_service = Arc::new(CartService::new(carts, products, events.clone()));

    build_router(AppState::new(catalog, cart_service, events))
}

pub async fn request_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request should complete");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, value)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    request_json(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("valid GET request"),
    )
    .await
}

pub async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    request_json(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid JSON request"),
    )
    .await
}

pub fn assert_problem(problem: &Value, status: u16, title: &str) {
    assert_eq!(
        problem.get("status").and_then(Value::as_u64),
        Some(u64::from(status))
    );
    assert_eq!(problem.get("title").and_then(Value::as_str), Some(title));
    assert!(problem.get("correlation_id").and_then(Value::as_str).is_some());
}

/// Seeds one product through the public API and returns its id.
pub async fn create_product(app: Router, title: &str, code: &str, category: &str, price: f64, stock: i64) -> String {
    let (status, created) = send_json(
        app,
        "POST",
        "/api/products",
        json!({
            "title": title,
            "description": "a long enough description",
            "code": code,
            "price": price,
            "stock": stock,
            "category": category,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "seed product: {created}");
    created
        .get("id")
        .and_then(Value::as_str)
        .expect("created product has an id")
        .to_string()
}
