use axum::{Json, http::StatusCode};

use crate::app::dto::GreetingResponse;

pub const WELCOME_TEXT: &str = "Willkommen im Backend von Eduard Morales!";
pub const GREETING: &str = "Hallo von der API!";

pub async fn home() -> &'static str {
    WELCOME_TEXT
}

pub async fn saludo() -> Json<GreetingResponse> {
    Json(GreetingResponse { message: GREETING })
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
