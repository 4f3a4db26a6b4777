use bge_config::Config;
use bge_core::{RequiredField, WizardSettings};

/// Wizard tunables derived from the persisted user configuration.
pub fn wizard_settings(config: &Config) -> WizardSettings {
    WizardSettings {
        toast_duration_secs: config.toast_duration_secs,
        validate_before_save: config.validate_before_save,
        batch_required_fields: config
            .batch_required_fields
            .iter()
            .map(|field| RequiredField::new(field.key.clone(), field.label.clone()))
            .collect(),
    }
}
