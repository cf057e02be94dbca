//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The max number of characters of a body to log at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a text body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
/// Binary bodies, such as the PDF export, are summarised by their size.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    tracing::info!(
        "Received request: {parts:#?}\nbody: {}",
        describe_body(&parts.headers, &body)
    );
    log_full_body("request", &parts.headers, &body);

    let request = Request::from_parts(parts, Body::from(body));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    tracing::info!(
        "Sending response: {parts:#?}\nbody: {}",
        describe_body(&parts.headers, &body)
    );
    log_full_body("response", &parts.headers, &body);

    Response::from_parts(parts, Body::from(body))
}

/// Whether the body should be logged as text.
fn is_text(headers: &HeaderMap, body: &[u8]) -> bool {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let is_text_type = content_type.is_empty()
        || content_type.starts_with("text/")
        || content_type.starts_with("application/x-www-form-urlencoded");

    is_text_type && std::str::from_utf8(body).is_ok()
}

/// A short description of `body` for the `info` level log.
fn describe_body(headers: &HeaderMap, body: &Bytes) -> String {
    if !is_text(headers, body) {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("unknown content type");

        return format!("<{} bytes of {content_type}>", body.len());
    }

    let text = String::from_utf8_lossy(body);

    if text.chars().count() > LOG_BODY_LENGTH_LIMIT {
        let truncated: String = text.chars().take(LOG_BODY_LENGTH_LIMIT).collect();
        format!("{truncated:?}...")
    } else {
        format!("{text:?}")
    }
}

fn log_full_body(direction: &str, headers: &HeaderMap, body: &Bytes) {
    if is_text(headers, body) && body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!(
            "Full {direction} body: {:?}",
            String::from_utf8_lossy(body)
        );
    }
}
