//! Strongly-typed identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a stored contact message.
///
/// Assigned by the storage layer at insert time; callers never mint one for
/// a new submission.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Generate a random (v4) identifier, matching what Postgres'
    /// `gen_random_uuid()` produces.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl core::fmt::Display for ContactId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for ContactId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<ContactId> for Uuid {
    fn from(value: ContactId) -> Self {
        value.0
    }
}

impl FromStr for ContactId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| DomainError::invalid_id(format!("ContactId: {e}")))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_the_same_uuid() {
        let id = ContactId::generate();
        let parsed: ContactId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-a-uuid".parse::<ContactId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn serializes_as_bare_string() {
        let uuid = Uuid::nil();
        let json = serde_json::to_value(ContactId::from_uuid(uuid)).unwrap();
        assert_eq!(json, serde_json::json!(uuid.to_string()));
    }
}
