use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use kontakt_infra::StoreError;

use crate::app::dto::StatusResponse;

/// Fixed message for any submission with a missing or empty field.
pub const MISSING_FIELDS_MESSAGE: &str = "Bitte füllen Sie alle Felder aus.";

/// Prefix for store failures while saving a submission.
pub const SAVE_FAILED_PREFIX: &str = "Fehler beim Speichern der Kontaktdaten";

/// Prefix for store failures while listing submissions.
pub const LIST_FAILED_PREFIX: &str = "Fehler beim Abrufen der Nachrichten";

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(StatusResponse::error(message))).into_response()
}

pub fn validation_error() -> Response {
    json_error(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
}

/// Store failures are server errors; the raw error text is passed through.
pub fn store_error_to_response(prefix: &str, err: &StoreError) -> Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, format!("{prefix}: {err}"))
}
