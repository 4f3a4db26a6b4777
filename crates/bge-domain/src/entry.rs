//! Data rows entered against a batch template.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One data row; values are keyed by the template field name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Entry {
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Returns `true` when the field holds a non-blank value.
    pub fn is_populated(&self, field: &str) -> bool {
        self.value(field)
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false)
    }
}
