use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A batch attribute the creator screen insists on, with its display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequiredFieldSetting {
    pub key: String,
    pub label: String,
}

impl RequiredFieldSetting {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Stores user-configurable wizard preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional directory for the template and batch catalog. Defaults to `<home>/data`.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_toast_duration_secs")]
    pub toast_duration_secs: u32,
    #[serde(default = "Config::default_validate_before_save")]
    pub validate_before_save: bool,
    #[serde(default = "Config::default_batch_required_fields")]
    pub batch_required_fields: Vec<RequiredFieldSetting>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            toast_duration_secs: Self::default_toast_duration_secs(),
            validate_before_save: Self::default_validate_before_save(),
            batch_required_fields: Self::default_batch_required_fields(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            plain_output: false,
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`] and listed by [`Config::entries`].
    pub const KEYS: [&'static str; 6] = [
        "data_dir",
        "toast_duration_secs",
        "validate_before_save",
        "batch_required_fields",
        "ui_color_enabled",
        "plain_output",
    ];

    pub fn default_toast_duration_secs() -> u32 {
        5
    }

    pub fn default_validate_before_save() -> bool {
        true
    }

    pub fn default_batch_required_fields() -> Vec<RequiredFieldSetting> {
        vec![RequiredFieldSetting::new("name", "Batch Name")]
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Key/value pairs in display form.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let data_dir = self
            .data_dir
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(default)".into());
        let required = self
            .batch_required_fields
            .iter()
            .map(|field| format!("{}={}", field.key, field.label))
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("data_dir", data_dir),
            ("toast_duration_secs", self.toast_duration_secs.to_string()),
            ("validate_before_save", self.validate_before_save.to_string()),
            ("batch_required_fields", required),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("plain_output", self.plain_output.to_string()),
        ]
    }

    /// Parses `raw` into the field named by `key`.
    ///
    /// `batch_required_fields` takes a comma separated list of `key=Label`
    /// pairs; a bare key is its own label.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let normalized = key.trim().to_ascii_lowercase().replace('-', "_");
        let value = raw.trim();
        match normalized.as_str() {
            "data_dir" => {
                self.data_dir = if value.is_empty() || value.eq_ignore_ascii_case("default") {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "toast_duration_secs" => {
                self.toast_duration_secs = value.parse::<u32>().map_err(|_| {
                    invalid(&normalized, "expected a whole number of seconds")
                })?;
            }
            "validate_before_save" => self.validate_before_save = parse_bool(&normalized, value)?,
            "batch_required_fields" => {
                self.batch_required_fields = value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| match item.split_once('=') {
                        Some((key, label)) => RequiredFieldSetting::new(key.trim(), label.trim()),
                        None => RequiredFieldSetting::new(item, item),
                    })
                    .collect();
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(&normalized, value)?,
            "plain_output" => self.plain_output = parse_bool(&normalized, value)?,
            _ => return Err(ConfigError::UnknownKey(key.trim().to_string())),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, "expected true or false")),
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
