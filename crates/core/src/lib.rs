//! `kontakt-core` — domain types for contact-form submissions.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod contact;
pub mod error;
pub mod id;

pub use contact::{ContactMessage, NewContactMessage};
pub use error::{DomainError, DomainResult};
pub use id::ContactId;
