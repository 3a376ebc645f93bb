//! Request ID middleware for request tracing and correlation.
//!
//! Generates a UUID v4 for each request if not provided by an upstream
//! proxy. The request ID is recorded in the current tracing span, added
//! to the Sentry scope, and returned in the response headers.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound id worth reusing; anything bigger is replaced.
const MAX_INBOUND_ID_LEN: usize = 64;

/// Middleware that ensures every request has a unique request ID.
///
/// An incoming `x-request-id` header (from a proxy or load balancer) is
/// reused when it looks sane; otherwise a new UUID v4 is generated. The
/// ID is recorded in the current tracing span, tagged on the Sentry
/// scope for error correlation, and echoed in the response headers.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id =
        inbound_request_id(request.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", &request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// A reusable request id from the inbound headers, if one was sent.
///
/// Ids that are blank, oversized, or not printable ASCII are discarded
/// so log lines and Sentry tags stay readable.
fn inbound_request_id(headers: &HeaderMap) -> Option<String> {
    let id = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    if id.is_empty() || id.len() > MAX_INBOUND_ID_LEN {
        return None;
    }
    if !id.chars().all(|c| c.is_ascii_graphic()) {
        return None;
    }
    Some(id.to_owned())
}
