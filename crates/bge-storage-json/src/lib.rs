use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::debug;

use bge_core::{Catalog, GatewayAction, GatewayError, GatewayResult, RemoteGateway};
use bge_domain::{Batch, BatchId, Entry, FieldRow, Template, TemplateId};

const CATALOG_FILE: &str = "catalog.json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed gateway keeping templates and batches in one JSON file.
///
/// Every call re-reads the file; mutating calls write it back atomically.
#[derive(Debug)]
pub struct JsonGateway {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonGateway {
    pub fn new(data_dir: PathBuf) -> GatewayResult<Self> {
        fs::create_dir_all(&data_dir).map_err(storage_error)?;
        Ok(Self {
            path: data_dir.join(CATALOG_FILE),
            lock: Mutex::new(()),
        })
    }

    pub fn catalog_path(&self) -> &Path {
        &self.path
    }

    /// Current file contents; an absent file reads as an empty catalog.
    pub fn load_catalog(&self) -> GatewayResult<Catalog> {
        load_catalog_from_path(&self.path)
    }

    fn read<T>(
        &self,
        action: GatewayAction,
        op: impl FnOnce(&Catalog) -> GatewayResult<T>,
    ) -> GatewayResult<T> {
        debug!(action = %action, path = %self.path.display(), "reading catalog");
        let _guard = self
            .lock
            .lock()
            .map_err(|_| GatewayError::Storage("catalog lock poisoned".into()))?;
        let catalog = self.load_catalog()?;
        op(&catalog)
    }

    fn write<T>(
        &self,
        action: GatewayAction,
        op: impl FnOnce(&mut Catalog) -> GatewayResult<T>,
    ) -> GatewayResult<T> {
        debug!(action = %action, path = %self.path.display(), "updating catalog");
        let _guard = self
            .lock
            .lock()
            .map_err(|_| GatewayError::Storage("catalog lock poisoned".into()))?;
        let mut catalog = self.load_catalog()?;
        let result = op(&mut catalog)?;
        save_catalog_to_path(&catalog, &self.path)?;
        Ok(result)
    }
}

impl RemoteGateway for JsonGateway {
    fn load_templates(&self) -> GatewayResult<Vec<Template>> {
        self.read(GatewayAction::LoadTemplates, |catalog| Ok(catalog.templates()))
    }

    fn load_template_fields(&self, template_id: TemplateId) -> GatewayResult<Vec<FieldRow>> {
        self.read(GatewayAction::LoadTemplateFields, |catalog| {
            catalog.template_fields(template_id)
        })
    }

    fn save_template(&self, template: &Template, fields: &[FieldRow]) -> GatewayResult<bool> {
        self.write(GatewayAction::SaveTemplate, |catalog| {
            catalog.save_template(template, fields)
        })
    }

    fn clone_template(&self, template: &Template, fields: &[FieldRow]) -> GatewayResult<bool> {
        self.write(GatewayAction::CloneTemplate, |catalog| {
            catalog.clone_template(template, fields)
        })
    }

    fn edit_template(
        &self,
        template: &Template,
        fields: &[FieldRow],
        fields_to_delete: &[FieldRow],
    ) -> GatewayResult<bool> {
        self.write(GatewayAction::EditTemplate, |catalog| {
            catalog.edit_template(template, fields, fields_to_delete)
        })
    }

    fn delete_template(&self, template: &Template) -> GatewayResult<()> {
        self.write(GatewayAction::DeleteTemplate, |catalog| {
            catalog.delete_template(template)
        })
    }

    fn save_batch(&self, batch: &Batch, template: &Template) -> GatewayResult<Batch> {
        self.write(GatewayAction::SaveBatch, |catalog| {
            catalog.save_batch(batch, template)
        })
    }

    fn load_batches(&self) -> GatewayResult<Vec<Batch>> {
        self.read(GatewayAction::LoadBatches, |catalog| Ok(catalog.batches()))
    }

    fn load_batch(&self, batch_id: BatchId) -> GatewayResult<Option<Batch>> {
        self.read(GatewayAction::LoadBatch, |catalog| Ok(catalog.batch(batch_id)))
    }

    fn save_entries(&self, batch_id: BatchId, entries: &[Entry]) -> GatewayResult<usize> {
        self.write(GatewayAction::SaveEntries, |catalog| {
            catalog.save_entries(batch_id, entries)
        })
    }
}

/// Saves a catalog to an arbitrary path on disk.
pub fn save_catalog_to_path(catalog: &Catalog, path: &Path) -> GatewayResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(storage_error)?;
    }
    let json = serde_json::to_string_pretty(catalog)
        .map_err(|err| GatewayError::Storage(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path).map_err(storage_error)?;
    Ok(())
}

/// Loads a catalog from the provided filesystem path.
pub fn load_catalog_from_path(path: &Path) -> GatewayResult<Catalog> {
    if !path.exists() {
        return Ok(Catalog::default());
    }
    let data = fs::read_to_string(path).map_err(storage_error)?;
    serde_json::from_str(&data).map_err(|err| GatewayError::Storage(err.to_string()))
}

fn storage_error(err: std::io::Error) -> GatewayError {
    GatewayError::Storage(err.to_string())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> GatewayResult<()> {
    let mut file = File::create(path).map_err(storage_error)?;
    file.write_all(data.as_bytes()).map_err(storage_error)?;
    file.sync_all().map_err(storage_error)?;
    Ok(())
}
