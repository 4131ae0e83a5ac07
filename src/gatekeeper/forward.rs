use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Relays an inbound request to a vault unchanged and streams the vault's
/// answer back verbatim, including non-2xx statuses and binary bodies.
///
/// The body is buffered rather than streamed; uploads are already bounded by
/// the vault's `max_upload_size`, so the relay holds at most one request in
/// memory. Hop-by-hop headers are dropped on both legs, everything else
/// passes through untouched.
pub async fn relay(client: &reqwest::Client, address: &str, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("http://{}{}", address, path_and_query);

    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to read request body for relay: {}", e);
            return (StatusCode::BAD_REQUEST, "invalid request body").into_response();
        }
    };

    let mut headers = parts.headers;
    strip_hop_headers(&mut headers);

    let upstream = match client
        .request(parts.method, &url)
        .headers(headers)
        .body(body_bytes)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Relay to {} failed: {}", url, e);
            return (StatusCode::BAD_GATEWAY, "vault unreachable").into_response();
        }
    };

    let status = upstream.status();
    let mut response_headers = upstream.headers().clone();
    strip_hop_headers(&mut response_headers);

    let response_bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to read vault response from {}: {}", url, e);
            return (StatusCode::BAD_GATEWAY, "vault response unreadable").into_response();
        }
    };

    let mut response = Response::new(Body::from(response_bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    response
}

// reqwest already decoded any transfer encoding, so relaying these headers
// with a re-framed body would corrupt the response.
fn strip_hop_headers(headers: &mut axum::http::HeaderMap) {
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONNECTION);
    headers.remove(header::CONTENT_LENGTH);
}
