use axum::{
    Router,
    http::{HeaderName, Method},
    routing::{get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    interface::http::{
        carts_handler::{
            add_product_to_cart, clear_cart, create_cart, delete_cart_product, get_cart,
            update_cart, update_cart_product,
        },
        events_handler::stream_events,
        products_handler::{
            create_product, delete_product, get_product, healthcheck, list_categories,
            list_products,
        },
    },
    state::AppState,
};

pub fn build_router(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/categories", get(list_categories))
        .route(
            "/api/products/{pid}",
            get(get_product).delete(delete_product),
        )
        .route("/api/carts", post(create_cart))
        .route(
            "/api/carts/{cid}",
            get(get_cart).put(update_cart).delete(clear_cart),
        )
        .route("/api/carts/{cid}/product/{pid}", post(add_product_to_cart))
        .route(
            "/api/carts/{cid}/products/{pid}",
            put(update_cart_product).delete(delete_cart_product),
        )
        .route("/api/events", get(stream_events))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .with_state(state)
}
