//! Process-local gateway backed by a [`Catalog`] held in memory.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use bge_domain::{Batch, BatchId, Entry, FieldRow, Template, TemplateId};

use crate::catalog::Catalog;
use crate::gateway::{GatewayAction, GatewayError, GatewayResult, RemoteGateway};

/// In-memory [`RemoteGateway`] that records every dispatched action.
///
/// Failures can be scripted per action with [`InMemoryGateway::fail_next`],
/// which makes the next call of that action complete with the given error.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    catalog: Mutex<Catalog>,
    calls: Mutex<Vec<GatewayAction>>,
    scripted_failures: Mutex<Vec<(GatewayAction, GatewayError)>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            ..Self::default()
        }
    }

    pub fn fail_next(&self, action: GatewayAction, error: GatewayError) {
        if let Ok(mut failures) = self.scripted_failures.lock() {
            failures.push((action, error));
        }
    }

    /// Actions dispatched so far, in call order.
    pub fn calls(&self) -> Vec<GatewayAction> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> Catalog {
        self.catalog
            .lock()
            .map(|catalog| catalog.clone())
            .unwrap_or_default()
    }

    fn begin(&self, action: GatewayAction) -> GatewayResult<MutexGuard<'_, Catalog>> {
        debug!(action = %action, "dispatching in-memory gateway action");
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(action);
        }
        if let Ok(mut failures) = self.scripted_failures.lock() {
            if let Some(position) = failures.iter().position(|(target, _)| *target == action) {
                let (_, error) = failures.remove(position);
                return Err(error);
            }
        }
        self.catalog
            .lock()
            .map_err(|_| GatewayError::Storage("catalog lock poisoned".into()))
    }
}

impl RemoteGateway for InMemoryGateway {
    fn load_templates(&self) -> GatewayResult<Vec<Template>> {
        Ok(self.begin(GatewayAction::LoadTemplates)?.templates())
    }

    fn load_template_fields(&self, template_id: TemplateId) -> GatewayResult<Vec<FieldRow>> {
        self.begin(GatewayAction::LoadTemplateFields)?
            .template_fields(template_id)
    }

    fn save_template(&self, template: &Template, fields: &[FieldRow]) -> GatewayResult<bool> {
        self.begin(GatewayAction::SaveTemplate)?
            .save_template(template, fields)
    }

    fn clone_template(&self, template: &Template, fields: &[FieldRow]) -> GatewayResult<bool> {
        self.begin(GatewayAction::CloneTemplate)?
            .clone_template(template, fields)
    }

    fn edit_template(
        &self,
        template: &Template,
        fields: &[FieldRow],
        fields_to_delete: &[FieldRow],
    ) -> GatewayResult<bool> {
        self.begin(GatewayAction::EditTemplate)?
            .edit_template(template, fields, fields_to_delete)
    }

    fn delete_template(&self, template: &Template) -> GatewayResult<()> {
        self.begin(GatewayAction::DeleteTemplate)?
            .delete_template(template)
    }

    fn save_batch(&self, batch: &Batch, template: &Template) -> GatewayResult<Batch> {
        self.begin(GatewayAction::SaveBatch)?
            .save_batch(batch, template)
    }

    fn load_batches(&self) -> GatewayResult<Vec<Batch>> {
        Ok(self.begin(GatewayAction::LoadBatches)?.batches())
    }

    fn load_batch(&self, batch_id: BatchId) -> GatewayResult<Option<Batch>> {
        Ok(self.begin(GatewayAction::LoadBatch)?.batch(batch_id))
    }

    fn save_entries(&self, batch_id: BatchId, entries: &[Entry]) -> GatewayResult<usize> {
        self.begin(GatewayAction::SaveEntries)?
            .save_entries(batch_id, entries)
    }
}
