use chrono::{DateTime, Utc};

use crate::{ContactId, DomainError, DomainResult};

/// A validated contact-form submission that has not been persisted yet.
///
/// The only way to build one is [`NewContactMessage::new`], so every value of
/// this type satisfies the "all three fields are non-empty" rule. Identity and
/// timestamp are deliberately absent: the store assigns both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    name: String,
    email: String,
    message: String,
}

impl NewContactMessage {
    /// Validate the three caller-supplied fields.
    ///
    /// Values are taken as-is: no trimming, no length limit and no e-mail
    /// format check. A whitespace-only field counts as present.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();
        let message = message.into();

        for (field, value) in [("name", &name), ("email", &email), ("message", &message)] {
            if value.is_empty() {
                return Err(DomainError::validation(format!("{field} must not be empty")));
            }
        }

        Ok(Self { name, email, message })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attach store-assigned identity and timestamp.
    pub fn into_stored(self, id: ContactId, created_at: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id,
            name: self.name,
            email: self.email,
            message: self.message,
            created_at,
        }
    }
}

/// A persisted contact message.
///
/// Records are append-only: created by a submission, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
