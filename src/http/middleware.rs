//! Cross-cutting layers applied to every route.
//!
//! Order matters and is fixed by [`crate::http::routing::app`]: request logging wraps
//! CORS, which wraps the panic guard, which wraps route dispatch. Preflight requests are
//! answered by the CORS layer and never reach a handler.

use std::any::Any;
use std::time::{Duration, Instant};

use axum::{extract::Request, middleware::Next, response::{IntoResponse, Response}};
use ::http::{header, HeaderMap, HeaderValue, Method, StatusCode};

use crate::http::types::ApiError;

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";
const MAX_AGE_SECS: &str = "86400";

fn add_cors_headers(headers: &mut HeaderMap) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
}

pub async fn cors(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut res = StatusCode::NO_CONTENT.into_response();
        add_cors_headers(res.headers_mut());
        return res;
    }
    let mut res = next.run(req).await;
    add_cors_headers(res.headers_mut());
    res
}

pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();
    let res = next.run(req).await;
    tracing::info!(
        %method,
        path = %path,
        status = res.status().as_u16(),
        elapsed_ms = whole_millis(started.elapsed()),
        "request"
    );
    res
}

fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Last line of defence: a handler that panics still produces a JSON 500.
pub async fn catch_panics(req: Request, next: Next) -> Response {
    match tokio::spawn(next.run(req)).await {
        Ok(res) => res,
        Err(err) => {
            let message = if err.is_panic() { panic_message(err.into_panic()) } else { "request cancelled".to_owned() };
            ApiError::Internal(message).into_response()
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(s) => *s,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(s) => (*s).to_owned(),
            Err(_) => "Internal Server Error".to_owned(),
        },
    }
}
