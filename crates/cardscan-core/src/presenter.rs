//! Rendering and export of extracted card details.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::clipboard::Clipboard;
use crate::document::DocumentKind;
use crate::notice::{MSG_COPIED, MSG_COPY_FAILED, MSG_DOWNLOADED, Notice};
use crate::CoreError;

/// Shown in place of an absent or empty field.
pub const MISSING_FIELD: &str = "-";

/// The `data` object of a successful extraction, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub kind: DocumentKind,
    pub data: Map<String, Value>,
}

/// One displayed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

impl ExtractionResult {
    pub fn new(kind: DocumentKind, data: Map<String, Value>) -> Self {
        Self { kind, data }
    }

    /// Project the data onto the kind's field schema.
    pub fn rows(&self) -> Vec<FieldRow> {
        render(self.kind, &self.data)
    }

    /// Pretty-printed JSON of exactly the cached data object.
    pub fn to_pretty_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }
}

/// One row per schema field. Missing, `null` and empty values become
/// [`MISSING_FIELD`]; keys outside the schema are ignored.
pub fn render(kind: DocumentKind, data: &Map<String, Value>) -> Vec<FieldRow> {
    kind.fields()
        .iter()
        .map(|spec| FieldRow {
            key: spec.key,
            label: spec.label,
            value: display_value(data.get(spec.key)),
        })
        .collect()
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_FIELD.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => MISSING_FIELD.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Copy the cached result to the clipboard. `None` when nothing is cached.
pub fn copy(result: Option<&ExtractionResult>, clipboard: &mut dyn Clipboard) -> Option<Notice> {
    let result = result?;
    let outcome = result
        .to_pretty_json()
        .and_then(|text| clipboard.write_text(&text));

    Some(match outcome {
        Ok(()) => Notice::success(MSG_COPIED),
        Err(e) => {
            tracing::warn!(kind = %result.kind, error = %e, "clipboard write failed");
            Notice::error(MSG_COPY_FAILED)
        }
    })
}

/// Write the cached result to `dir/{kind}_card_details.json`.
pub fn save_to_dir(result: &ExtractionResult, dir: &Path) -> Result<PathBuf, CoreError> {
    let json = result.to_pretty_json()?;
    let path = dir.join(result.kind.export_filename());
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Download the cached result into `dir`. `None` when nothing is cached.
pub fn download(result: Option<&ExtractionResult>, dir: &Path) -> Option<Notice> {
    let result = result?;
    Some(match save_to_dir(result, dir) {
        Ok(path) => {
            tracing::info!(kind = %result.kind, path = %path.display(), "exported card details");
            Notice::success(MSG_DOWNLOADED)
        }
        Err(e) => {
            tracing::warn!(kind = %result.kind, error = %e, "export failed");
            Notice::error(format!("Failed to save file: {e}"))
        }
    })
}
