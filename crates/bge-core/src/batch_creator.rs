//! Batch Creator: collects draft batch attributes before template selection.

use bge_domain::Batch;

use crate::error::CoreError;
use crate::wizard::MountRequest;

const REVIEW_HEADER: &str = "Please review the following fields:\n";

/// A batch attribute that must be populated, with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredField {
    pub key: String,
    pub label: String,
}

impl RequiredField {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Checks every field in `fields`, appending one `- label` line to `message`
/// per unpopulated field. Returns `true` when all are populated.
pub fn check_fields_population(
    batch: &Batch,
    fields: &[RequiredField],
    message: &mut String,
) -> bool {
    let mut valid = true;
    for field in fields {
        if batch.field_value(&field.key).is_none() {
            valid = false;
            message.push_str("- ");
            message.push_str(&field.label);
            message.push('\n');
        }
    }
    valid
}

#[derive(Debug, Clone)]
pub struct BatchCreator {
    draft: Batch,
    required_fields: Vec<RequiredField>,
}

impl BatchCreator {
    pub fn new(required_fields: Vec<RequiredField>) -> Self {
        Self {
            draft: Batch::draft(),
            required_fields,
        }
    }

    pub fn draft(&self) -> &Batch {
        &self.draft
    }

    pub fn required_fields(&self) -> &[RequiredField] {
        &self.required_fields
    }

    pub fn set_field(&mut self, key: &str, raw: &str) -> Result<(), CoreError> {
        self.draft.set_field(key, raw)?;
        Ok(())
    }

    /// Validates the draft and hands it to template selection. Nothing is
    /// persisted here.
    pub fn save(&self) -> Result<MountRequest, CoreError> {
        let mut message = String::from(REVIEW_HEADER);
        if !check_fields_population(&self.draft, &self.required_fields, &mut message) {
            return Err(CoreError::Validation(message.trim_end().to_string()));
        }
        Ok(MountRequest::TemplateSelection {
            batch: Some(self.draft.clone()),
        })
    }

    pub fn next_to_initial(&self) -> MountRequest {
        MountRequest::Initial
    }
}
