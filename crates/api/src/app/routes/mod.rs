use axum::{Router, routing::get, routing::post};

pub mod contacts;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/saludo", get(system::saludo))
        .route("/contacto", post(contacts::submit_contact))
        .route("/mensajes", get(contacts::list_contacts))
}
