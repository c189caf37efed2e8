use tiny_http::Request;

use knn_canvas::codec;

use crate::routes::{error_response, png_response, read_body, HttpResponse};
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// POST /preview
// ---------------------------------------------------------------------------

/// Body: one P3 image. Responds with the same image as PNG.
pub fn handle(request: &mut Request, state: &SharedState) -> HttpResponse {
    let body = match read_body(request) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    let png = codec::decode(&body).and_then(|canvas| codec::encode_png(&canvas));
    match png {
        Ok(bytes) => {
            state.counters().previews += 1;
            png_response(bytes)
        }
        Err(e) => error_response(400, &e.to_string()),
    }
}
