//! Template Selector: lists existing templates and routes the chosen one to
//! editing, cloning, deletion, or data entry.

use std::convert::TryFrom;

use tracing::{info, warn};

use bge_domain::{Batch, Template};

use crate::error::CoreError;
use crate::gateway::RemoteGateway;
use crate::template_editor::EditorMode;
use crate::wizard::MountRequest;

/// Action codes offered on a highlighted template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateAction {
    Edit = 1,
    Clone = 2,
    Delete = 3,
}

impl TryFrom<u8> for TemplateAction {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(TemplateAction::Edit),
            2 => Ok(TemplateAction::Clone),
            3 => Ok(TemplateAction::Delete),
            other => Err(CoreError::InvalidOperation(format!(
                "unknown template action code {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorOutcome {
    /// Nothing highlighted; the action was ignored.
    Idle,
    Navigate(MountRequest),
    Deleted(Template),
}

#[derive(Debug, Clone)]
pub struct TemplateSelector {
    associated_batch: Option<Batch>,
    templates: Vec<Template>,
    current: Option<usize>,
}

impl TemplateSelector {
    /// Loads every existing template. A failed load leaves the list empty.
    pub fn open(associated_batch: Option<Batch>, gateway: &dyn RemoteGateway) -> Self {
        let mut selector = Self::with_templates(associated_batch, Vec::new());
        selector.reload(gateway);
        selector
    }

    pub fn with_templates(associated_batch: Option<Batch>, templates: Vec<Template>) -> Self {
        Self {
            associated_batch,
            templates,
            current: None,
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn associated_batch(&self) -> Option<&Batch> {
        self.associated_batch.as_ref()
    }

    /// Marks the template at `index` as the target of the next action.
    pub fn highlight(&mut self, index: usize) -> Option<&Template> {
        if index < self.templates.len() {
            self.current = Some(index);
        }
        self.current()
    }

    pub fn current(&self) -> Option<&Template> {
        self.current.and_then(|index| self.templates.get(index))
    }

    pub fn select_template(
        &mut self,
        action: TemplateAction,
        gateway: &dyn RemoteGateway,
    ) -> Result<SelectorOutcome, CoreError> {
        let Some(current) = self.current().cloned() else {
            return Ok(SelectorOutcome::Idle);
        };
        let Some(template_id) = current.id else {
            return Err(CoreError::InvalidOperation(
                "selected template has not been saved".into(),
            ));
        };

        match action {
            TemplateAction::Edit => Ok(SelectorOutcome::Navigate(MountRequest::TemplateCreation {
                template: current,
                mode: EditorMode::Edit {
                    template: template_id,
                },
            })),
            TemplateAction::Clone => {
                let mut copy = current;
                copy.name.clear();
                Ok(SelectorOutcome::Navigate(MountRequest::TemplateCreation {
                    template: copy,
                    mode: EditorMode::Clone {
                        source: template_id,
                    },
                }))
            }
            TemplateAction::Delete => {
                gateway.delete_template(&current)?;
                info!(template = %current.name, "template deleted");
                self.reload(gateway);
                Ok(SelectorOutcome::Deleted(current))
            }
        }
    }

    /// Persists the in-progress batch against the template at `index` and
    /// moves on to data entry. Without a batch this does nothing.
    pub fn next_to_enter_data(
        &mut self,
        index: usize,
        gateway: &dyn RemoteGateway,
    ) -> Result<Option<MountRequest>, CoreError> {
        let Some(template) = self.templates.get(index).cloned() else {
            return Err(CoreError::InvalidOperation(format!(
                "template {} does not exist",
                index + 1
            )));
        };
        let Some(batch) = self.associated_batch.as_mut() else {
            return Ok(None);
        };

        batch.associate_template(&template);
        let stored = gateway.save_batch(batch, &template)?;
        info!(batch = %stored.name, template = %template.name, "batch saved");
        let batch_id = stored.id;
        *batch = stored;
        Ok(Some(MountRequest::EnterData { batch_id }))
    }

    pub fn next_to_template_creation(&self) -> MountRequest {
        MountRequest::TemplateCreation {
            template: Template::draft(),
            mode: EditorMode::Create,
        }
    }

    pub fn next_to_batch_creation(&self) -> MountRequest {
        MountRequest::BatchCreation
    }

    fn reload(&mut self, gateway: &dyn RemoteGateway) {
        match gateway.load_templates() {
            Ok(templates) => self.templates = templates,
            Err(err) => {
                warn!(error = %err, "loading templates failed");
                self.templates.clear();
            }
        }
        self.current = None;
    }
}
