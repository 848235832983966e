use axum::{http::StatusCode, middleware::from_fn, routing::get, Json, Router};
use tower::ServiceBuilder;

use super::{middleware, types::MessageBody};

/// Mounts the health probe and `router`, then wraps everything in the global middleware stack.
pub fn app(router: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(router)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(middleware::log_requests))
                .layer(from_fn(middleware::cors))
                .layer(from_fn(middleware::catch_panics)),
        )
}

async fn route_not_found() -> (StatusCode, Json<MessageBody>) {
    (StatusCode::NOT_FOUND, Json(MessageBody::new("Route not found")))
}

async fn method_not_allowed() -> (StatusCode, Json<MessageBody>) {
    (StatusCode::METHOD_NOT_ALLOWED, Json(MessageBody::new("Method not allowed")))
}
