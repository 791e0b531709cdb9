//! Structured save document: `{ settings, items[] }`
//!
//! Reading is lenient the same way the item editor is: missing keys take
//! their defaults, numbers stored as text are parsed, and unparsable numbers
//! or due dates fall back to the default. Items still pass through
//! [`ItemStore::add`], so a document cannot smuggle in a non-positive weight
//! or negative hours.

use super::tabular::parse_done;
use crate::error::{Result, ValidationError};
use crate::tracker::{Item, ItemStatus, ItemStore, NewItem, Settings, parse_due_lenient, parse_tags};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

/// One item as it appears in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub done: bool,
    #[serde(default, deserialize_with = "lenient_number")]
    pub weight: Option<f64>,
    /// `YYYY-MM-DD` or empty
    #[serde(default)]
    pub due: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub est_hours: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    /// Comma separated
    #[serde(default)]
    pub tags: String,
}

fn default_name() -> String {
    "Untitled".to_string()
}

/// Accept a number, a numeric string, or anything else as "no value"
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accept a bool, a nonzero number, or the same truthy text as CSV cells
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => parse_done(&s),
        _ => false,
    })
}

impl ItemRecord {
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name().to_string(),
            done: item.is_done(),
            weight: Some(item.weight()),
            due: item.due_text(),
            est_hours: Some(item.est_hours()),
            status: Some(item.status().label().to_string()),
            tags: item.tags_text(),
        }
    }

    pub fn to_new_item(&self) -> NewItem {
        NewItem {
            name: self.name.clone(),
            done: self.done,
            weight: self.weight.unwrap_or(1.0),
            due: parse_due_lenient(&self.due),
            est_hours: self.est_hours.unwrap_or(0.0),
            status: ItemStatus::from_import(self.status.as_deref(), self.done),
            tags: parse_tags(&self.tags),
        }
    }
}

impl Document {
    pub fn new(settings: &Settings, items: &[Item]) -> Self {
        Self {
            settings: settings.clone(),
            items: items.iter().map(ItemRecord::from_item).collect(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate every item into a fresh store. Nothing is returned unless the
    /// whole list is valid.
    pub fn build_store(&self) -> Result<ItemStore, ValidationError> {
        let mut store = ItemStore::new();
        for record in &self.items {
            store.add(record.to_new_item())?;
        }
        Ok(store)
    }
}
