use crate::batch_creator::RequiredField;

/// Tunables the screens read at mount time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSettings {
    pub toast_duration_secs: u32,
    /// Runs the required-name check before dispatching a template save.
    pub validate_before_save: bool,
    pub batch_required_fields: Vec<RequiredField>,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            toast_duration_secs: 5,
            validate_before_save: true,
            batch_required_fields: vec![RequiredField::new("name", "Batch Name")],
        }
    }
}
