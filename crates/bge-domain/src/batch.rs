//! Domain types representing batches of entered records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::*;
use crate::template::Template;

/// Lifecycle of a batch: a draft until the template step persists it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum BatchStatus {
    #[default]
    Draft,
    Open,
    Completed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BatchStatus::Draft => "Draft",
            BatchStatus::Open => "Open",
            BatchStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// A unit of work that will hold entered rows, bound to one template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Batch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BatchId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<TemplateId>,
    #[serde(default)]
    pub status: BatchStatus,
    pub created_at: DateTime<Utc>,
}

impl Batch {
    /// Attribute keys understood by [`Batch::field_value`] and [`Batch::set_field`].
    pub const FIELD_KEYS: [&'static str; 4] =
        ["name", "description", "expected_count", "expected_total"];

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            expected_count: None,
            expected_total: None,
            template_id: None,
            status: BatchStatus::Draft,
            created_at: Utc::now(),
        }
    }

    /// An in-memory batch with no attributes populated yet.
    pub fn draft() -> Self {
        Self::new("")
    }

    /// Links the batch to the template that describes its rows.
    pub fn associate_template(&mut self, template: &Template) {
        self.template_id = template.id;
    }

    /// Returns the attribute addressed by `key`, or `None` when it is unpopulated.
    pub fn field_value(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            "name" => optional_text(&self.name),
            "description" => self.description.clone(),
            "expected_count" => self.expected_count.map(|value| value.to_string()),
            "expected_total" => self.expected_total.map(|value| value.to_string()),
            _ => None,
        }
    }

    pub fn set_field(&mut self, key: &str, raw: &str) -> Result<(), DomainError> {
        let trimmed = raw.trim();
        match normalize_key(key).as_str() {
            "name" => self.name = trimmed.to_string(),
            "description" => self.description = optional_text(trimmed),
            "expected_count" => {
                self.expected_count = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.parse::<u32>().map_err(|_| {
                        DomainError::invalid("expected_count", "expected a whole number")
                    })?)
                };
            }
            "expected_total" => {
                self.expected_total = if trimmed.is_empty() {
                    None
                } else {
                    let value = trimmed.parse::<f64>().map_err(|_| {
                        DomainError::invalid("expected_total", "expected a numeric amount")
                    })?;
                    if value < 0.0 {
                        return Err(DomainError::invalid(
                            "expected_total",
                            "amount must be zero or positive",
                        ));
                    }
                    Some(value)
                };
            }
            _ => return Err(DomainError::UnknownField(key.trim().to_string())),
        }
        Ok(())
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('-', "_")
}

impl Identifiable for Batch {
    type Id = BatchId;

    fn id(&self) -> Option<BatchId> {
        self.id
    }
}

impl NamedEntity for Batch {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Batch {
    fn display_label(&self) -> String {
        let name = if self.name.is_empty() {
            "(unnamed)"
        } else {
            self.name.as_str()
        };
        match self.id {
            Some(id) => format!("{} [{}] ({})", name, id.short(), self.status),
            None => format!("{} ({})", name, self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_batch_has_no_populated_fields() {
        let batch = Batch::draft();
        for key in Batch::FIELD_KEYS {
            assert_eq!(batch.field_value(key), None, "{key} should be empty");
        }
        assert_eq!(batch.status, BatchStatus::Draft);
    }

    #[test]
    fn set_field_parses_numbers() {
        let mut batch = Batch::draft();
        batch.set_field("expected-count", "12").unwrap();
        batch.set_field("expected_total", "150.5").unwrap();
        assert_eq!(batch.expected_count, Some(12));
        assert_eq!(batch.field_value("expected_total").as_deref(), Some("150.5"));
        assert!(batch.set_field("expected_count", "twelve").is_err());
        assert!(batch.set_field("expected_total", "-1").is_err());
        assert_eq!(
            batch.set_field("colour", "red"),
            Err(DomainError::UnknownField("colour".into()))
        );
    }

    #[test]
    fn associate_template_copies_identity() {
        let mut batch = Batch::new("March gifts");
        let template = Template::new("Gifts").with_id(TemplateId::new());
        batch.associate_template(&template);
        assert_eq!(batch.template_id, template.id);
    }
}
