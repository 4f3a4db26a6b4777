//! Template Row Editor: the dynamic list of field rows behind template
//! creation, cloning and editing.

use std::fmt;

use tracing::{debug, info, warn};

use bge_domain::{FieldAttribute, FieldRow, Identifiable, Template, TemplateId};

use crate::error::CoreError;
use crate::gateway::{GatewayAction, RemoteGateway};
use crate::notify::{Notifier, Toast};
use crate::settings::WizardSettings;
use crate::wizard::MountRequest;

/// A template name must be longer than this to enable moving on.
pub const TEMPLATE_NAME_MIN_CHARS: usize = 3;

/// Intent of an editor session. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Clone { source: TemplateId },
    Edit { template: TemplateId },
}

impl EditorMode {
    /// Remote action a save dispatches in this mode.
    pub fn action(self) -> GatewayAction {
        match self {
            EditorMode::Create => GatewayAction::SaveTemplate,
            EditorMode::Clone { .. } => GatewayAction::CloneTemplate,
            EditorMode::Edit { .. } => GatewayAction::EditTemplate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditorMode::Create => "create",
            EditorMode::Clone { .. } => "clone",
            EditorMode::Edit { .. } => "edit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Editing,
    Saving,
}

/// Completed save responses. Transport and server failures surface as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    DuplicateName,
}

/// Rows whose name is blank, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFieldReport {
    rows: Vec<usize>,
}

impl RequiredFieldReport {
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// One blocking notice per offending row.
    pub fn messages(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| format!("Field name can't be blank on row number {}", row))
            .collect()
    }
}

impl fmt::Display for RequiredFieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("\n"))
    }
}

/// Editing session for one template and its ordered field rows.
#[derive(Debug, Clone)]
pub struct TemplateEditor {
    template: Template,
    mode: EditorMode,
    rows: Vec<FieldRow>,
    deletions: Vec<FieldRow>,
    phase: SessionPhase,
    toast_duration_secs: u32,
    validate_before_save: bool,
}

impl TemplateEditor {
    /// Starts a session, fetching the persisted rows when the template has an
    /// identity. A failed fetch leaves the list empty.
    pub fn open(
        template: Template,
        mode: EditorMode,
        gateway: &dyn RemoteGateway,
        settings: &WizardSettings,
    ) -> Self {
        let mut editor = Self::with_rows(template, mode, Vec::new(), settings);
        editor.phase = SessionPhase::Loading;

        if let Some(template_id) = editor.template.id() {
            match gateway.load_template_fields(template_id) {
                Ok(rows) => {
                    debug!(template = %template_id, rows = rows.len(), "loaded template fields");
                    editor.rows = rows;
                }
                Err(err) => {
                    warn!(template = %template_id, error = %err, "loading template fields failed");
                }
            }
        }

        if editor.rows.is_empty() {
            editor.add_row();
        }
        editor.phase = SessionPhase::Editing;
        editor
    }

    /// Builds a session over rows already in hand, without touching the gateway.
    pub fn with_rows(
        template: Template,
        mode: EditorMode,
        rows: Vec<FieldRow>,
        settings: &WizardSettings,
    ) -> Self {
        Self {
            template,
            mode,
            rows,
            deletions: Vec::new(),
            phase: SessionPhase::Editing,
            toast_duration_secs: settings.toast_duration_secs,
            validate_before_save: settings.validate_before_save,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn rows(&self) -> &[FieldRow] {
        &self.rows
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut FieldRow> {
        self.rows.get_mut(index)
    }

    /// Persisted rows removed during this session.
    pub fn deletions(&self) -> &[FieldRow] {
        &self.deletions
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.template.name = name.into();
    }

    pub fn set_description(&mut self, raw: &str) {
        self.template.set_description(raw);
    }

    /// `true` once the template name is long enough to move on.
    pub fn can_advance(&self) -> bool {
        self.template.name.trim().chars().count() >= TEMPLATE_NAME_MIN_CHARS
    }

    /// Appends a default row and returns its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(FieldRow::blank());
        self.rows.len() - 1
    }

    /// Removes the row at `index`. Persisted rows are queued for deletion.
    pub fn remove_row(&mut self, index: usize) -> Option<FieldRow> {
        if index >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(index);
        if row.is_persisted() {
            self.deletions.push(row.clone());
        }
        Some(row)
    }

    pub fn set_row_attribute(
        &mut self,
        index: usize,
        attribute: FieldAttribute,
        raw: &str,
    ) -> Result<(), CoreError> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(CoreError::RowOutOfRange(index + 1))?;
        row.set_attribute(attribute, raw)?;
        Ok(())
    }

    /// Fails when any row has a blank name, naming every offending row.
    pub fn validate_required(&self) -> Result<(), RequiredFieldReport> {
        let rows: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.has_name())
            .map(|(index, _)| index + 1)
            .collect();
        if rows.is_empty() {
            Ok(())
        } else {
            Err(RequiredFieldReport { rows })
        }
    }

    /// Dispatches the save matching the session mode and fires one toast.
    ///
    /// In-memory edits are kept whatever the outcome.
    pub fn save(
        &mut self,
        gateway: &dyn RemoteGateway,
        notifier: &mut dyn Notifier,
    ) -> Result<SaveOutcome, CoreError> {
        if self.validate_before_save {
            self.validate_required().map_err(CoreError::RequiredFields)?;
        }

        let action = self.mode.action();
        self.phase = SessionPhase::Saving;
        debug!(
            action = %action,
            rows = self.rows.len(),
            deletions = self.deletions.len(),
            "dispatching template save"
        );
        let response = match self.mode {
            EditorMode::Create => gateway.save_template(&self.template, &self.rows),
            EditorMode::Clone { .. } => gateway.clone_template(&self.template, &self.rows),
            EditorMode::Edit { .. } => {
                gateway.edit_template(&self.template, &self.rows, &self.deletions)
            }
        };
        self.phase = SessionPhase::Editing;

        match response {
            Ok(true) => {
                info!(action = %action, template = %self.template.name, "template saved");
                if let EditorMode::Edit { template } = self.mode {
                    self.refresh_persisted_rows(template, gateway);
                }
                notifier.notify(Toast::saved(self.toast_duration_secs));
                Ok(SaveOutcome::Saved)
            }
            Ok(false) => {
                info!(action = %action, template = %self.template.name, "template name already taken");
                notifier.notify(Toast::duplicate_name(self.toast_duration_secs));
                Ok(SaveOutcome::DuplicateName)
            }
            Err(err) => {
                warn!(action = %action, error = %err, "template save did not complete");
                Err(err.into())
            }
        }
    }

    /// Picks up the identities the gateway assigned so a later save updates
    /// the same rows instead of inserting them again.
    fn refresh_persisted_rows(&mut self, template: TemplateId, gateway: &dyn RemoteGateway) {
        self.deletions.clear();
        match gateway.load_template_fields(template) {
            Ok(rows) if !rows.is_empty() => self.rows = rows,
            Ok(_) => {
                self.rows.clear();
                self.add_row();
            }
            Err(err) => {
                warn!(template = %template, error = %err, "reloading template fields failed");
            }
        }
    }

    pub fn next_to_initial(&self) -> MountRequest {
        MountRequest::Initial
    }
}
