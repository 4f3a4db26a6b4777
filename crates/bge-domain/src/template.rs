//! Domain types describing batch templates and their field rows.

use serde::{Deserialize, Serialize};

use crate::common::*;

/// A named, ordered schema describing which fields a batch collects.
///
/// The ordered field list is not embedded here: rows travel beside the
/// template through the gateway, the same way they are edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TemplateId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
        }
    }

    /// A fresh, never-persisted template with an empty name.
    pub fn draft() -> Self {
        Self::new("")
    }

    pub fn with_id(mut self, id: TemplateId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_description(&mut self, raw: &str) {
        self.description = optional_text(raw);
    }
}

impl Identifiable for Template {
    type Id = TemplateId;

    fn id(&self) -> Option<TemplateId> {
        self.id
    }
}

impl NamedEntity for Template {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Template {
    fn display_label(&self) -> String {
        match (&self.id, self.name.is_empty()) {
            (Some(id), false) => format!("{} [{}]", self.name, id.short()),
            (Some(id), true) => format!("(unnamed) [{}]", id.short()),
            (None, false) => self.name.clone(),
            (None, true) => "(unnamed draft)".into(),
        }
    }
}

/// Attributes of a [`FieldRow`] that can be assigned from raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAttribute {
    Name,
    Order,
    ReadOnly,
    Required,
    Sticky,
    StickyValue,
    StickyVisibility,
}

impl FieldAttribute {
    pub const ALL: [FieldAttribute; 7] = [
        FieldAttribute::Name,
        FieldAttribute::Order,
        FieldAttribute::ReadOnly,
        FieldAttribute::Required,
        FieldAttribute::Sticky,
        FieldAttribute::StickyValue,
        FieldAttribute::StickyVisibility,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FieldAttribute::Name => "name",
            FieldAttribute::Order => "order",
            FieldAttribute::ReadOnly => "read-only",
            FieldAttribute::Required => "required",
            FieldAttribute::Sticky => "sticky",
            FieldAttribute::StickyValue => "sticky-value",
            FieldAttribute::StickyVisibility => "sticky-visible",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|attr| attr.key() == normalized)
            .ok_or_else(|| DomainError::UnknownField(raw.trim().to_string()))
    }
}

/// One field definition inside a template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FieldRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldId>,
    pub name: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub sticky: bool,
    #[serde(default)]
    pub sticky_value: String,
    #[serde(default)]
    pub sticky_visibility: bool,
}

impl FieldRow {
    /// The default row: empty name, order 0, every flag off.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: FieldId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn set_attribute(&mut self, attribute: FieldAttribute, raw: &str) -> Result<(), DomainError> {
        match attribute {
            FieldAttribute::Name => self.name = raw.trim().to_string(),
            FieldAttribute::Order => {
                self.order = raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| DomainError::invalid("order", "expected a whole number"))?;
            }
            FieldAttribute::ReadOnly => self.read_only = parse_flag("read-only", raw)?,
            FieldAttribute::Required => self.required = parse_flag("required", raw)?,
            FieldAttribute::Sticky => self.sticky = parse_flag("sticky", raw)?,
            FieldAttribute::StickyValue => self.sticky_value = raw.to_string(),
            FieldAttribute::StickyVisibility => {
                self.sticky_visibility = parse_flag("sticky-visible", raw)?
            }
        }
        Ok(())
    }

    /// Compact flag summary such as `RO REQ STICKY`.
    pub fn flag_summary(&self) -> String {
        let mut flags = Vec::new();
        if self.read_only {
            flags.push("RO");
        }
        if self.required {
            flags.push("REQ");
        }
        if self.sticky {
            flags.push("STICKY");
        }
        if flags.is_empty() {
            "-".into()
        } else {
            flags.join(" ")
        }
    }
}

impl Identifiable for FieldRow {
    type Id = FieldId;

    fn id(&self) -> Option<FieldId> {
        self.id
    }
}

impl NamedEntity for FieldRow {
    fn name(&self) -> &str {
        &self.name
    }
}
