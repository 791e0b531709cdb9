//! Import, export, save and load handlers
//!
//! Files are read and fully parsed before the session is locked, so a bad
//! file never leaves the session half-replaced.

use crate::TrackerServerHandler;
use crate::storage;
use mcp_attr::{Result as McpResult, bail_public};
use std::path::Path;
use tracing::info;

impl TrackerServerHandler {
    /// **Import CSV**: Add items from a CSV file with at least a `name` column.
    /// **Mode**: Appends by default; `replace`=true deletes the current items first.
    pub async fn handle_import_csv(&self, path: String, replace: Option<bool>) -> McpResult<String> {
        let replace = replace.unwrap_or(false);
        let staging = match storage::import_csv_file(Path::new(&path)) {
            Ok(store) => store,
            Err(e) => bail_public!(_, "Could not import CSV: {}", e),
        };

        let mut session = self.session.lock().unwrap();
        let added = session.import_items(staging, replace);
        drop(session);

        info!(
            "Imported {} item(s) from {} ({})",
            added,
            path,
            if replace { "replace" } else { "append" }
        );
        self.autosave();
        Ok(format!("Added {} item(s) from CSV", added))
    }

    /// **Export CSV**: Write all items (ignoring the tag filter) to a CSV file.
    pub async fn handle_export_csv(&self, path: String) -> McpResult<String> {
        let session = self.session.lock().unwrap();
        let result = storage::export_csv_file(Path::new(&path), session.items());
        drop(session);

        match result {
            Ok(count) => Ok(format!("Exported {} item(s) to {}", count, path)),
            Err(e) => bail_public!(_, "Could not export CSV: {}", e),
        }
    }

    /// **Save as**: Write settings and items to a JSON document at `path`.
    /// The working file keeps being autosaved as before.
    pub async fn handle_save_as(&self, path: String) -> McpResult<String> {
        let session = self.session.lock().unwrap();
        let doc = session.to_document();
        drop(session);

        if let Err(e) = storage::write_document(Path::new(&path), &doc) {
            bail_public!(_, "Could not save file: {}", e);
        }
        Ok(format!("Progress saved to {}", path))
    }

    /// **Load**: Replace settings and items with a JSON document. Clears the alert history.
    pub async fn handle_load(&self, path: String) -> McpResult<String> {
        let doc = match storage::read_document(Path::new(&path)) {
            Ok(doc) => doc,
            Err(e) => bail_public!(_, "Could not load file: {}", e),
        };

        let mut session = self.session.lock().unwrap();
        let count = match session.load_document(doc) {
            Ok(count) => count,
            Err(e) => {
                drop(session);
                bail_public!(_, "Could not load file: {}", e);
            }
        };
        drop(session);

        self.autosave();
        Ok(format!("Loaded {} item(s) from {}", count, path))
    }
}
