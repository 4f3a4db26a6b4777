//! Shared identifiers, traits, and errors for batch entry records.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Exposes the persisted identifier of a record, if it has one yet.
pub trait Identifiable {
    type Id;

    fn id(&self) -> Option<Self::Id>;

    /// Returns `true` once the gateway has assigned an identity.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// First eight hex characters, used in compact listings.
            pub fn short(&self) -> String {
                self.0.simple().to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identity of a persisted batch.
    BatchId
);
record_id!(
    /// Identity of a persisted template.
    TemplateId
);
record_id!(
    /// Identity of a persisted template field row.
    FieldId
);

/// Failures raised while assigning raw values to domain records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Unknown field `{0}`")]
    UnknownField(String),
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl DomainError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        DomainError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub(crate) fn parse_flag(field: &str, raw: &str) -> Result<bool, DomainError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" => Ok(true),
        "n" | "no" | "false" | "0" | "off" => Ok(false),
        _ => Err(DomainError::invalid(field, "expected yes/no, true/false, or 1/0")),
    }
}

/// Trims the value and maps blank input to `None`.
pub(crate) fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
