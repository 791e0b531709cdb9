//! CSV interchange
//!
//! Export always writes the full column set in a fixed order. Import only
//! requires a `name` column; the other columns fall back to defaults.

use crate::error::{Result, TrackerError};
use crate::tracker::{Item, ItemStatus, ItemStore, NewItem, parse_due_lenient, parse_tags};
use std::collections::HashMap;
use std::io::{Read, Write};

pub const CSV_COLUMNS: [&str; 7] = [
    "name",
    "done",
    "weight",
    "due",
    "est_hours",
    "status",
    "tags",
];

pub(crate) fn parse_done(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "true" | "True" | "yes" | "YES")
}

/// Parse a numeric cell, using `default` when it is empty or malformed
fn parse_number(raw: Option<&str>, default: f64) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Read every row into a staging store
///
/// Rows with an empty name are skipped. A missing `name` column, a malformed
/// file or any row that fails validation rejects the whole import, so the
/// caller's store is only touched once this returns `Ok`.
pub fn read_items<R: Read>(reader: R) -> Result<ItemStore> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns: HashMap<String, usize> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();
    if !columns.contains_key("name") {
        return Err(TrackerError::MissingColumn("name"));
    }

    let mut staging = ItemStore::new();
    for record in rdr.records() {
        let record = record?;
        let cell = |column: &str| columns.get(column).and_then(|&i| record.get(i));

        let name = cell("name").unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        let done = parse_done(cell("done").unwrap_or("0"));
        let status = cell("status").filter(|s| !s.is_empty());

        let new = NewItem {
            name: name.to_string(),
            done,
            weight: parse_number(cell("weight"), 1.0),
            due: cell("due").and_then(parse_due_lenient),
            est_hours: parse_number(cell("est_hours"), 0.0),
            status: ItemStatus::from_import(status, done),
            tags: parse_tags(cell("tags").unwrap_or("")),
        };
        staging.add(new)?;
    }
    Ok(staging)
}

/// Write the header and one row per item
pub fn write_items<W: Write>(items: &[Item], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_COLUMNS)?;
    for item in items {
        wtr.write_record([
            item.name().to_string(),
            if item.is_done() { "1" } else { "0" }.to_string(),
            format!("{:.2}", item.weight()),
            item.due_text(),
            format!("{:.2}", item.est_hours()),
            item.status().label().to_string(),
            item.tags_text(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
