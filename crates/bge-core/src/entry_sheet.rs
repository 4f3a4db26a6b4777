//! Entry Sheet: data rows entered against the template of a persisted batch.

use tracing::{info, warn};

use bge_domain::{Batch, BatchId, DomainError, Entry, FieldRow};

use crate::error::CoreError;
use crate::gateway::RemoteGateway;
use crate::notify::{Notifier, Toast};
use crate::settings::WizardSettings;
use crate::wizard::MountRequest;

#[derive(Debug, Clone)]
pub struct EntrySheet {
    batch: Option<Batch>,
    fields: Vec<FieldRow>,
    entries: Vec<Entry>,
    toast_duration_secs: u32,
}

impl EntrySheet {
    /// Loads the batch and its template fields. Without a batch identity the
    /// sheet stays inert.
    pub fn open(
        batch_id: Option<BatchId>,
        gateway: &dyn RemoteGateway,
        settings: &WizardSettings,
    ) -> Self {
        let mut sheet = Self {
            batch: None,
            fields: Vec::new(),
            entries: Vec::new(),
            toast_duration_secs: settings.toast_duration_secs,
        };
        let Some(batch_id) = batch_id else {
            return sheet;
        };

        match gateway.load_batch(batch_id) {
            Ok(Some(batch)) => sheet.batch = Some(batch),
            Ok(None) => warn!(batch = %batch_id, "batch not found"),
            Err(err) => warn!(batch = %batch_id, error = %err, "loading batch failed"),
        }

        if let Some(template_id) = sheet.batch.as_ref().and_then(|batch| batch.template_id) {
            match gateway.load_template_fields(template_id) {
                Ok(fields) => sheet.fields = fields,
                Err(err) => {
                    warn!(template = %template_id, error = %err, "loading template fields failed")
                }
            }
        }
        sheet
    }

    pub fn is_ready(&self) -> bool {
        self.batch.is_some()
    }

    pub fn batch(&self) -> Option<&Batch> {
        self.batch.as_ref()
    }

    pub fn fields(&self) -> &[FieldRow] {
        &self.fields
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Appends an entry with sticky fields carried over from the previous
    /// entry, falling back to the field's sticky value.
    pub fn add_entry(&mut self) -> Option<usize> {
        if !self.is_ready() {
            return None;
        }
        let previous = self.entries.last();
        let mut entry = Entry::new();
        for field in self.fields.iter().filter(|field| field.sticky) {
            let carried = previous
                .and_then(|entry| entry.value(&field.name))
                .map(str::to_string)
                .unwrap_or_else(|| field.sticky_value.clone());
            if !carried.is_empty() {
                entry.set(field.name.clone(), carried);
            }
        }
        self.entries.push(entry);
        Some(self.entries.len() - 1)
    }

    pub fn set_value(&mut self, index: usize, field: &str, value: &str) -> Result<(), CoreError> {
        self.ensure_ready()?;
        let definition = self
            .fields
            .iter()
            .find(|candidate| candidate.name.eq_ignore_ascii_case(field.trim()))
            .ok_or_else(|| DomainError::UnknownField(field.trim().to_string()))?;
        if definition.read_only {
            return Err(CoreError::InvalidOperation(format!(
                "field `{}` is read-only",
                definition.name
            )));
        }
        let name = definition.name.clone();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(CoreError::RowOutOfRange(index + 1))?;
        entry.set(name, value.trim());
        Ok(())
    }

    pub fn remove_entry(&mut self, index: usize) -> Option<Entry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Reports every entry missing a required value.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut problems = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let missing: Vec<&str> = self
                .fields
                .iter()
                .filter(|field| field.required && !entry.is_populated(&field.name))
                .map(|field| field.name.as_str())
                .collect();
            if !missing.is_empty() {
                problems.push(format!("Entry {}: missing {}", index + 1, missing.join(", ")));
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(problems.join("\n")))
        }
    }

    /// Persists pending entries and clears them from the sheet.
    pub fn save(
        &mut self,
        gateway: &dyn RemoteGateway,
        notifier: &mut dyn Notifier,
    ) -> Result<usize, CoreError> {
        let batch_id = self.ensure_ready()?;
        if self.entries.is_empty() {
            return Ok(0);
        }
        self.validate()?;
        let stored = gateway.save_entries(batch_id, &self.entries)?;
        info!(batch = %batch_id, entries = stored, "entries saved");
        self.entries.clear();
        notifier.notify(Toast::saved(self.toast_duration_secs));
        Ok(stored)
    }

    pub fn next_to_template_selection(&self) -> MountRequest {
        MountRequest::TemplateSelection { batch: None }
    }

    fn ensure_ready(&self) -> Result<BatchId, CoreError> {
        self.batch
            .as_ref()
            .and_then(|batch| batch.id)
            .ok_or_else(|| CoreError::InvalidOperation("no batch selected for data entry".into()))
    }
}
