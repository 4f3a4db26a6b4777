//! Reference semantics of the persistence API, shared by the in-memory and
//! file-backed gateways.

use serde::{Deserialize, Serialize};

use bge_domain::{
    Batch, BatchId, BatchStatus, Entry, FieldId, FieldRow, Template, TemplateId,
};

use crate::gateway::{GatewayError, GatewayResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredTemplate {
    pub template: Template,
    #[serde(default)]
    pub fields: Vec<FieldRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredBatch {
    pub batch: Batch,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Snapshot of every persisted template, field row, batch and entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub templates: Vec<StoredTemplate>,
    #[serde(default)]
    pub batches: Vec<StoredBatch>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn templates(&self) -> Vec<Template> {
        self.templates
            .iter()
            .map(|stored| stored.template.clone())
            .collect()
    }

    pub fn template_fields(&self, template_id: TemplateId) -> GatewayResult<Vec<FieldRow>> {
        self.stored_template(template_id)
            .map(|stored| stored.fields.clone())
            .ok_or_else(|| missing_template(template_id))
    }

    /// Stores a brand-new template. Returns `Ok(false)` on a name collision.
    pub fn save_template(&mut self, template: &Template, fields: &[FieldRow]) -> GatewayResult<bool> {
        self.insert_copy(template, fields)
    }

    /// Stores a copy of an existing template under a new name.
    pub fn clone_template(&mut self, template: &Template, fields: &[FieldRow]) -> GatewayResult<bool> {
        self.insert_copy(template, fields)
    }

    pub fn edit_template(
        &mut self,
        template: &Template,
        fields: &[FieldRow],
        fields_to_delete: &[FieldRow],
    ) -> GatewayResult<bool> {
        let id = template.id.ok_or_else(|| {
            GatewayError::Server("cannot edit a template without an identity".into())
        })?;
        require_name(template)?;
        if self.name_taken(&template.name, Some(id)) {
            return Ok(false);
        }
        let stored = self
            .templates
            .iter_mut()
            .find(|stored| stored.template.id == Some(id))
            .ok_or_else(|| missing_template(id))?;

        stored.template.name = template.name.trim().to_string();
        stored.template.description = template.description.clone();

        let deleted: Vec<FieldId> = fields_to_delete.iter().filter_map(|row| row.id).collect();
        let mut previous: Vec<FieldRow> = stored
            .fields
            .drain(..)
            .filter(|row| !row.id.map(|id| deleted.contains(&id)).unwrap_or(false))
            .collect();

        let mut next = Vec::with_capacity(fields.len());
        for row in fields {
            let mut row = row.clone();
            match row.id {
                Some(existing) if previous.iter().any(|old| old.id == Some(existing)) => {
                    previous.retain(|old| old.id != Some(existing));
                }
                _ => row.id = Some(FieldId::new()),
            }
            next.push(row);
        }
        // Rows the caller neither sent nor deleted stay persisted.
        next.extend(previous);
        stored.fields = next;
        Ok(true)
    }

    pub fn delete_template(&mut self, template: &Template) -> GatewayResult<()> {
        let id = template
            .id
            .ok_or_else(|| GatewayError::NotFound("template has no identity".into()))?;
        let before = self.templates.len();
        self.templates.retain(|stored| stored.template.id != Some(id));
        if self.templates.len() == before {
            return Err(missing_template(id));
        }
        Ok(())
    }

    pub fn save_batch(&mut self, batch: &Batch, template: &Template) -> GatewayResult<Batch> {
        let template_id = template.id.ok_or_else(|| {
            GatewayError::Server("batch template must be persisted first".into())
        })?;
        if self.stored_template(template_id).is_none() {
            return Err(missing_template(template_id));
        }

        let mut record = batch.clone();
        record.template_id = Some(template_id);
        if record.status == BatchStatus::Draft {
            record.status = BatchStatus::Open;
        }

        if let Some(id) = record.id {
            if let Some(stored) = self
                .batches
                .iter_mut()
                .find(|stored| stored.batch.id == Some(id))
            {
                stored.batch = record.clone();
                return Ok(record);
            }
        } else {
            record.id = Some(BatchId::new());
        }

        self.batches.push(StoredBatch {
            batch: record.clone(),
            entries: Vec::new(),
        });
        Ok(record)
    }

    pub fn batches(&self) -> Vec<Batch> {
        self.batches.iter().map(|stored| stored.batch.clone()).collect()
    }

    pub fn batch(&self, batch_id: BatchId) -> Option<Batch> {
        self.batches
            .iter()
            .find(|stored| stored.batch.id == Some(batch_id))
            .map(|stored| stored.batch.clone())
    }

    pub fn entries(&self, batch_id: BatchId) -> Vec<Entry> {
        self.batches
            .iter()
            .find(|stored| stored.batch.id == Some(batch_id))
            .map(|stored| stored.entries.clone())
            .unwrap_or_default()
    }

    pub fn save_entries(&mut self, batch_id: BatchId, entries: &[Entry]) -> GatewayResult<usize> {
        let stored = self
            .batches
            .iter_mut()
            .find(|stored| stored.batch.id == Some(batch_id))
            .ok_or_else(|| GatewayError::NotFound(format!("batch {}", batch_id)))?;
        stored.entries.extend(entries.iter().cloned());
        Ok(entries.len())
    }

    fn insert_copy(&mut self, template: &Template, fields: &[FieldRow]) -> GatewayResult<bool> {
        require_name(template)?;
        if self.name_taken(&template.name, None) {
            return Ok(false);
        }
        let record = Template {
            id: Some(TemplateId::new()),
            name: template.name.trim().to_string(),
            description: template.description.clone(),
        };
        let fields = fields
            .iter()
            .cloned()
            .map(|row| row.with_id(FieldId::new()))
            .collect();
        self.templates.push(StoredTemplate {
            template: record,
            fields,
        });
        Ok(true)
    }

    fn stored_template(&self, template_id: TemplateId) -> Option<&StoredTemplate> {
        self.templates
            .iter()
            .find(|stored| stored.template.id == Some(template_id))
    }

    fn name_taken(&self, name: &str, except: Option<TemplateId>) -> bool {
        let normalized = normalize_name(name);
        self.templates.iter().any(|stored| {
            let is_self = except.is_some() && stored.template.id == except;
            !is_self && normalize_name(&stored.template.name) == normalized
        })
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn require_name(template: &Template) -> GatewayResult<()> {
    if template.name.trim().is_empty() {
        Err(GatewayError::Server("template name is required".into()))
    } else {
        Ok(())
    }
}

fn missing_template(id: TemplateId) -> GatewayError {
    GatewayError::NotFound(format!("template {}", id))
}
