//! Persistence codecs
//!
//! - `document`: the full `{settings, items}` save document (JSON)
//! - `tabular`: CSV import/export of the item list

pub mod document;
pub mod tabular;

pub use document::{Document, ItemRecord};
pub use tabular::{CSV_COLUMNS, read_items, write_items};
