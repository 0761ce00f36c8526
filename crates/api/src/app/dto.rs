use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use kontakt_core::{ContactMessage, DomainResult, NewContactMessage};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/contacto`.
///
/// Field names are the form's wire names. Every field is optional here so
/// that a missing field is reported as a validation failure rather than a
/// deserialization error.
///
/// Only a JSON object is accepted; arrays and scalars fail to deserialize.
#[derive(Debug, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct SubmitContactRequest {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub mensaje: Option<String>,
}

impl TryFrom<Map<String, Value>> for SubmitContactRequest {
    type Error = String;

    fn try_from(mut body: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut field = |name: &str| match body.remove(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(format!("{name}: expected a string, got {other}")),
        };

        Ok(Self {
            nombre: field("nombre")?,
            email: field("email")?,
            mensaje: field("mensaje")?,
        })
    }
}

impl SubmitContactRequest {
    /// Validate into a domain submission. Absent fields count as empty.
    pub fn into_new_message(self) -> DomainResult<NewContactMessage> {
        NewContactMessage::new(
            self.nombre.unwrap_or_default(),
            self.email.unwrap_or_default(),
            self.mensaje.unwrap_or_default(),
        )
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Error,
}

/// `{"message": ..., "status": "success" | "error"}`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: Outcome,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Outcome::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Outcome::Error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactMessageResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    /// RFC 3339, microsecond precision, explicit offset.
    pub created_at: String,
}

impl From<ContactMessage> for ContactMessageResponse {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name,
            email: m.email,
            message: m.message,
            created_at: m.created_at.to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kontakt_core::{ContactId, DomainError};

    #[test]
    fn missing_fields_fail_validation() {
        let req: SubmitContactRequest =
            serde_json::from_value(serde_json::json!({ "nombre": "Ana", "email": "ana@example.com" })).unwrap();
        assert!(matches!(req.into_new_message(), Err(DomainError::Validation(_))));

        let req: SubmitContactRequest =
            serde_json::from_value(serde_json::json!({ "nombre": null, "email": "a", "mensaje": "b" })).unwrap();
        assert!(matches!(req.into_new_message(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn only_json_objects_are_accepted() {
        let bodies = [
            serde_json::json!(["Ana", "ana@example.com", "Hola"]),
            serde_json::json!("Ana"),
            serde_json::json!(null),
            serde_json::json!({ "nombre": 42, "email": "ana@example.com", "mensaje": "Hola" }),
        ];

        for body in bodies {
            let parsed = serde_json::from_value::<SubmitContactRequest>(body.clone());
            assert!(parsed.is_err(), "accepted {body}");
        }
    }

    #[test]
    fn wire_names_map_to_domain_fields() {
        let req: SubmitContactRequest = serde_json::from_value(serde_json::json!({
            "nombre": "Ana",
            "email": "ana@example.com",
            "mensaje": "Hola",
        }))
        .unwrap();

        let msg = req.into_new_message().unwrap();
        assert_eq!(msg.name(), "Ana");
        assert_eq!(msg.email(), "ana@example.com");
        assert_eq!(msg.message(), "Hola");
    }

    #[test]
    fn contact_response_formats_timestamp_with_offset() {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 30).unwrap()
            + chrono::Duration::microseconds(123_456);
        let id = ContactId::generate();
        let stored = NewContactMessage::new("Ana", "ana@example.com", "Hola")
            .unwrap()
            .into_stored(id, created_at);

        let json = serde_json::to_value(ContactMessageResponse::from(stored)).unwrap();
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["message"], "Hola");
        assert_eq!(json["created_at"], "2025-03-01T10:15:30.123456+00:00");
    }

    #[test]
    fn status_response_shape() {
        let json = serde_json::to_value(StatusResponse::error("nope")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "nope", "status": "error" }));
    }
}
