use crate::codec::{self, Document};
use crate::error::{Result, TrackerError};
use crate::tracker::{Item, ItemStore};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The session's working file plus the autosave switch
pub struct Storage {
    file_path: PathBuf,
    autosave: bool,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>, autosave: bool) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            autosave,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave
    }

    /// `Ok(None)` when the working file does not exist yet
    pub fn load(&self) -> Result<Option<Document>> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        read_document(&self.file_path).map(Some)
    }

    pub fn save(&self, doc: &Document) -> Result<()> {
        write_document(&self.file_path, doc)
    }

    /// Write the working file after a mutation. Failures are logged and
    /// otherwise ignored.
    pub fn autosave(&self, doc: &Document) {
        if !self.autosave {
            return;
        }
        match self.save(doc) {
            Ok(()) => debug!("Autosaved to {}", self.file_path.display()),
            Err(e) => warn!("Autosave failed: {}", e),
        }
    }
}

pub fn read_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path).map_err(|e| TrackerError::io(path, e))?;
    Document::from_json(&content)
}

pub fn write_document(path: &Path, doc: &Document) -> Result<()> {
    let content = doc.to_json()?;
    fs::write(path, content).map_err(|e| TrackerError::io(path, e))
}

/// Parse a CSV file into a staging store
pub fn import_csv_file(path: &Path) -> Result<ItemStore> {
    let file = File::open(path).map_err(|e| TrackerError::io(path, e))?;
    codec::read_items(file)
}

/// Write the items to a CSV file; an empty list is refused
pub fn export_csv_file(path: &Path, items: &[Item]) -> Result<usize> {
    if items.is_empty() {
        return Err(TrackerError::NothingToExport);
    }
    let file = File::create(path).map_err(|e| TrackerError::io(path, e))?;
    codec::write_items(items, file)?;
    Ok(items.len())
}
