//! HTTP response building module
//!
//! Builders for the handful of responses the server produces, decoupled from the handlers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Response type produced by every handler
pub type HttpResponse = Response<Full<Bytes>>;

pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";
pub const JSON_CONTENT_TYPE: &str = "application/json";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Add headers that stop browsers and proxies from caching the response
pub fn no_cache(builder: Builder) -> Builder {
    builder
        .header("Cache-Control", NO_CACHE)
        .header("Pragma", "no-cache")
        .header("Expires", "0")
}

/// Add permissive CORS headers (any origin, the given methods, `Content-Type`)
pub fn cors(builder: Builder, methods: &str) -> Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", methods)
        .header("Access-Control-Allow-Headers", "Content-Type")
}

/// Plain-text error response with a trailing newline, the way most HTTP stacks render them
pub fn build_text_response(builder: Builder, status: StatusCode, message: &str) -> HttpResponse {
    finish(
        builder
            .status(status)
            .header("Content-Type", TEXT_CONTENT_TYPE)
            .header("X-Content-Type-Options", "nosniff"),
        Bytes::from(format!("{message}\n")),
    )
}

/// Build 404 Not Found response
pub fn build_404_response() -> HttpResponse {
    build_text_response(Response::builder(), StatusCode::NOT_FOUND, "404 page not found")
}

/// Build 405 Method Not Allowed response on top of `builder`
pub fn build_405_response(builder: Builder, allow: &str) -> HttpResponse {
    build_text_response(
        builder.header("Allow", allow),
        StatusCode::METHOD_NOT_ALLOWED,
        "Method not allowed",
    )
}

/// Build 500 Internal Server Error response on top of `builder`
pub fn build_500_response(builder: Builder) -> HttpResponse {
    build_text_response(
        builder,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    )
}

/// Empty-bodied response with the given status
pub fn build_empty_response(builder: Builder, status: StatusCode) -> HttpResponse {
    finish(builder.status(status), Bytes::new())
}

/// Serialize `body` as a 200 JSON response
///
/// Serialization errors are returned to the caller, which decides how to report them.
pub fn build_json_response<T: Serialize>(
    builder: Builder,
    body: &T,
) -> Result<HttpResponse, serde_json::Error> {
    let mut json = serde_json::to_vec(body)?;
    json.push(b'\n');
    Ok(finish(
        builder
            .status(StatusCode::OK)
            .header("Content-Type", JSON_CONTENT_TYPE),
        Bytes::from(json),
    ))
}

/// Build file response; HEAD keeps the headers but drops the body
pub fn build_file_response(
    builder: Builder,
    data: Bytes,
    content_type: &str,
    is_head: bool,
) -> HttpResponse {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    finish(
        builder
            .status(StatusCode::OK)
            .header("Content-Type", content_type)
            .header("Content-Length", content_length),
        body,
    )
}

/// Attach the body, falling back to a bare 500 if a header was rejected
fn finish(builder: Builder, body: Bytes) -> HttpResponse {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        eprintln!("[ERROR] Failed to build response: {e}");
        let mut resp = Response::new(Full::new(Bytes::new()));
        *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        resp
    })
}
