//! Contract of the remote persistence actions the wizard depends on.
//!
//! Every call completes exactly once: the returned `Result` is the completion
//! callback. Implementations decide storage, query logic and duplicate
//! detection; screens only consume the request/response shape.

use std::fmt;

use thiserror::Error;

use bge_domain::{Batch, BatchId, Entry, FieldRow, Template, TemplateId};

/// Named remote operations, used for dispatch logging and call recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayAction {
    LoadTemplates,
    LoadTemplateFields,
    SaveTemplate,
    CloneTemplate,
    EditTemplate,
    DeleteTemplate,
    SaveBatch,
    LoadBatches,
    LoadBatch,
    SaveEntries,
}

impl GatewayAction {
    /// Remote action name as exposed by the persistence API.
    pub fn remote_name(self) -> &'static str {
        match self {
            GatewayAction::LoadTemplates => "loadTemplates",
            GatewayAction::LoadTemplateFields => "loadTemplateFields",
            GatewayAction::SaveTemplate => "saveTemplate",
            GatewayAction::CloneTemplate => "cloneTemplate",
            GatewayAction::EditTemplate => "editTemplate",
            GatewayAction::DeleteTemplate => "deleteTemplate",
            GatewayAction::SaveBatch => "saveBatch",
            GatewayAction::LoadBatches => "loadBatches",
            GatewayAction::LoadBatch => "loadBatch",
            GatewayAction::SaveEntries => "saveEntries",
        }
    }
}

impl fmt::Display for GatewayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.remote_name())
    }
}

/// Non-success completion of a remote action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Remote persistence API consumed by the wizard screens.
///
/// `save_template`, `clone_template` and `edit_template` answer `false` when a
/// template with the same name already exists.
pub trait RemoteGateway: Send + Sync {
    fn load_templates(&self) -> GatewayResult<Vec<Template>>;

    fn load_template_fields(&self, template_id: TemplateId) -> GatewayResult<Vec<FieldRow>>;

    fn save_template(&self, template: &Template, fields: &[FieldRow]) -> GatewayResult<bool>;

    fn clone_template(&self, template: &Template, fields: &[FieldRow]) -> GatewayResult<bool>;

    fn edit_template(
        &self,
        template: &Template,
        fields: &[FieldRow],
        fields_to_delete: &[FieldRow],
    ) -> GatewayResult<bool>;

    fn delete_template(&self, template: &Template) -> GatewayResult<()>;

    /// Persists the batch bound to `template`, returning the stored record.
    fn save_batch(&self, batch: &Batch, template: &Template) -> GatewayResult<Batch>;

    fn load_batches(&self) -> GatewayResult<Vec<Batch>>;

    fn load_batch(&self, batch_id: BatchId) -> GatewayResult<Option<Batch>>;

    /// Appends entries to a batch, returning how many were stored.
    fn save_entries(&self, batch_id: BatchId, entries: &[Entry]) -> GatewayResult<usize>;
}
