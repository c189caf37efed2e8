use log::{error, info};
use tiny_http::Request;

use knn_canvas::{codec, CanvasError, KnnError};

use crate::routes::{error_response, json_response, read_body, HttpResponse};
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// POST /predict
// ---------------------------------------------------------------------------

/// Body: one P3 image. Responds with the predicted label and its neighbors.
pub fn handle(request: &mut Request, state: &SharedState) -> HttpResponse {
    let body = match read_body(request) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    let query = match codec::decode(&body) {
        Ok(canvas) => canvas,
        Err(e) => return error_response(400, &e.to_string()),
    };

    match state.classifier.predict_detailed(&query) {
        Ok(prediction) => {
            state.counters().predictions += 1;
            info!("predicted {:?} for a {}x{} query", prediction.label, query.width(), query.height());
            json_response(&prediction)
        }
        // A lazily loaded training file went missing on our side.
        Err(e @ KnnError::Canvas(CanvasError::Io { .. })) => {
            error!("training set unreadable: {}", e);
            error_response(500, &e.to_string())
        }
        Err(e) => error_response(400, &e.to_string()),
    }
}
