//! Plain HTTP responses.

use axum::response::{IntoResponse, Response};

/// Body of the liveness page served to any non-WebSocket request
pub const LIVENESS_BODY: &str = "Signaling relay is running.";

/// Liveness page (`200 OK`, `text/plain`)
pub fn liveness() -> Response {
    LIVENESS_BODY.into_response()
}
