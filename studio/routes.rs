use std::io::{Cursor, Read};

use log::{debug, warn};
use serde::Serialize;
use serde_json::json;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn response(status: u16, content_type: &str, body: Vec<u8>) -> HttpResponse {
    let mut resp = Response::from_data(body).with_status_code(StatusCode(status));
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()) {
        resp.add_header(header);
    }
    resp
}

pub fn json_response(value: &impl Serialize) -> HttpResponse {
    match serde_json::to_vec(value) {
        Ok(bytes) => response(200, "application/json", bytes),
        Err(e) => error_response(500, &e.to_string()),
    }
}

pub fn png_response(bytes: Vec<u8>) -> HttpResponse {
    response(200, "image/png", bytes)
}

/// `{"error": message}` with the given status.
pub fn error_response(status: u16, message: &str) -> HttpResponse {
    let body = json!({ "error": message }).to_string().into_bytes();
    response(status, "application/json", body)
}

pub fn not_found() -> HttpResponse {
    error_response(404, "not found")
}

/// Largest accepted request body. An 800×800 P3 image is about 7.7 MB.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Reads the request body, rejecting anything over `MAX_BODY_BYTES`.
pub fn read_body(request: &mut Request) -> Result<Vec<u8>, HttpResponse> {
    let too_large = || error_response(400, &format!("request body exceeds {MAX_BODY_BYTES} bytes"));
    if request.body_length().is_some_and(|len| len > MAX_BODY_BYTES) {
        return Err(too_large());
    }

    let mut body = Vec::new();
    Read::take(request.as_reader(), MAX_BODY_BYTES as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| error_response(400, &format!("unreadable request body: {e}")))?;
    if body.len() > MAX_BODY_BYTES {
        return Err(too_large());
    }
    Ok(body)
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Routes one request to its handler and sends the response.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    let response = match (&method, path.as_str()) {
        (Method::Get,  "/health")  => handlers::info::handle_health(&state),
        (Method::Get,  "/labels")  => handlers::info::handle_labels(&state),
        (Method::Get,  "/stats")   => handlers::info::handle_stats(&state),
        (Method::Post, "/predict") => handlers::predict::handle(&mut request, &state),
        (Method::Post, "/preview") => handlers::preview::handle(&mut request, &state),
        _ => not_found(),
    };

    let status = response.status_code().0;
    {
        let mut counters = state.counters();
        counters.requests += 1;
        if status >= 400 {
            counters.errors += 1;
        }
    }
    debug!("{} {} -> {}", method, path, status);

    if let Err(e) = request.respond(response) {
        warn!("failed to send response for {} {}: {}", method, path, e);
    }
}
