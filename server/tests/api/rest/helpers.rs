//! Request helpers for exercising the router in-process.
//!
//! Every helper returns the response status plus the parsed JSON body
//! so assertions stay one-liners in the tests.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

pub async fn get_request(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None, None, &[]).await
}

pub async fn get_request_with_token(router: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None, Some(token), &[]).await
}

/// GET with a spoofed client address, for throttle-key tests.
pub async fn get_request_from_ip(router: &Router, uri: &str, ip: &str) -> (StatusCode, Value) {
    send(
        router,
        Method::GET,
        uri,
        None,
        None,
        &[("x-forwarded-for", ip)],
    )
    .await
}

pub async fn post_request(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(body), None, &[]).await
}

pub async fn post_request_with_token(
    router: &Router,
    uri: &str,
    body: Value,
    token: &str,
) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(body), Some(token), &[]).await
}

pub async fn put_request(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::PUT, uri, Some(body), None, &[]).await
}

pub async fn put_request_with_token(
    router: &Router,
    uri: &str,
    body: Value,
    token: &str,
) -> (StatusCode, Value) {
    send(router, Method::PUT, uri, Some(body), Some(token), &[]).await
}

pub async fn patch_request_with_token(
    router: &Router,
    uri: &str,
    body: Value,
    token: &str,
) -> (StatusCode, Value) {
    send(router, Method::PATCH, uri, Some(body), Some(token), &[]).await
}

pub async fn delete_request(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::DELETE, uri, None, None, &[]).await
}

pub async fn delete_request_with_token(
    router: &Router,
    uri: &str,
    token: &str,
) -> (StatusCode, Value) {
    send(router, Method::DELETE, uri, None, Some(token), &[]).await
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
    extra_headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    for (name, value) in extra_headers {
        builder = builder.header(*name, *value);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}
