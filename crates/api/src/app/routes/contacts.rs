use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app::{dto, errors, services::AppServices};

pub const SAVED_MESSAGE: &str = "Kontaktdaten erfolgreich empfangen und gespeichert";

/// `POST /api/contacto`
///
/// A body that cannot be read as the expected JSON object is treated like a
/// submission with missing fields.
pub async fn submit_contact(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::SubmitContactRequest>, JsonRejection>,
) -> Response {
    let new_message = match body {
        Ok(Json(body)) => body.into_new_message(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable contact body");
            return errors::validation_error();
        }
    };

    let new_message = match new_message {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(error = %e, "contact submission rejected");
            return errors::validation_error();
        }
    };

    match services.contacts().insert(new_message).await {
        Ok(stored) => {
            tracing::info!(
                id = %stored.id,
                name = %stored.name,
                email = %stored.email,
                "contact message stored"
            );
            (StatusCode::OK, Json(dto::StatusResponse::success(SAVED_MESSAGE))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to store contact message");
            errors::store_error_to_response(errors::SAVE_FAILED_PREFIX, &e)
        }
    }
}

/// `GET /api/mensajes`
pub async fn list_contacts(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.contacts().list_all().await {
        Ok(messages) => {
            let items = messages
                .into_iter()
                .map(dto::ContactMessageResponse::from)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to list contact messages");
            errors::store_error_to_response(errors::LIST_FAILED_PREFIX, &e)
        }
    }
}
