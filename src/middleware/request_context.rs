use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";
const REAL_IP_HEADER: &str = "x-real-ip";
const UNKNOWN_CLIENT: &str = "unknown";

/// Per-request identity stored in request extensions
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: Uuid,
    /// Key used for the daily quota
    pub client_ip: String,
}

/// Client address: first `x-forwarded-for` hop, then `x-real-ip`, then the peer socket
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    header(FORWARDED_FOR_HEADER)
        .and_then(|value| value.split(',').next().map(|hop| hop.trim().to_string()))
        .filter(|hop| !hop.is_empty())
        .or_else(|| header(REAL_IP_HEADER))
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Middleware that attaches a [`RequestContext`] to the request and echoes the
/// request ID in the response headers.
///
/// An inbound `x-request-id` holding a valid UUID is reused; otherwise a new
/// UUID v4 is generated.
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let context = RequestContext {
        request_id,
        client_ip: client_ip(request.headers(), peer),
    };
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

/// Tracing span for an HTTP request, tagged with the request context
pub fn make_span_with_request_context(request: &Request<Body>) -> tracing::Span {
    let (request_id, client_ip) = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| (ctx.request_id.to_string(), ctx.client_ip.clone()))
        .unwrap_or_else(|| (UNKNOWN_CLIENT.to_string(), UNKNOWN_CLIENT.to_string()));

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
        client_ip = %client_ip,
    )
}
