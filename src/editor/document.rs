//! In-process TOML editing.
//!
//! Uses `toml_edit::DocumentMut` so comments, ordering and whitespace of the
//! rest of the file survive the version change.

use std::fs;
use std::path::Path;

use toml_edit::{table, value, DocumentMut, TableLike};
use tracing::debug;

use crate::editor::StructuredFileEditor;
use crate::error::{ReleaseError, Result};

/// Formatting-preserving TOML editor
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlEditor;

impl TomlEditor {
    /// Set `key` to `value` in an already loaded TOML document.
    ///
    /// Missing intermediate tables are created. A segment that resolves to a
    /// non-table value is an error.
    pub fn set_in_document(
        &self,
        contents: &str,
        key: &str,
        value_str: &str,
        path: &Path,
    ) -> Result<String> {
        let mut doc = contents
            .parse::<DocumentMut>()
            .map_err(|e| ReleaseError::edit(path, format!("invalid TOML: {}", e)))?;

        let segments: Vec<&str> = key.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ReleaseError::edit(
                path,
                format!("invalid key path '{}'", key),
            ));
        }
        let (last, parents) = match segments.split_last() {
            Some(split) => split,
            None => {
                return Err(ReleaseError::edit(path, "empty key path"));
            }
        };

        let mut current: &mut dyn TableLike = doc.as_table_mut();
        for (depth, segment) in parents.iter().enumerate() {
            current = current
                .entry(segment)
                .or_insert(table())
                .as_table_like_mut()
                .ok_or_else(|| {
                    ReleaseError::edit(
                        path,
                        format!("`{}` is not a table", segments[..=depth].join(".")),
                    )
                })?;
        }

        match current.get_mut(last) {
            Some(item) if item.is_table_like() => {
                return Err(ReleaseError::edit(
                    path,
                    format!("`{}` is a table, not a value", key),
                ));
            }
            Some(item) => {
                // Keep the spacing and trailing comment around the old value
                let decor = item.as_value().map(|v| v.decor().clone());
                *item = value(value_str);
                if let (Some(decor), Some(new_value)) = (decor, item.as_value_mut()) {
                    *new_value.decor_mut() = decor;
                }
            }
            None => {
                current.insert(last, value(value_str));
            }
        }

        Ok(doc.to_string())
    }
}

impl StructuredFileEditor for TomlEditor {
    fn set_value(&self, path: &Path, key: &str, value: &str) -> Result<String> {
        debug!("Setting {} = \"{}\" in {}", key, value, path.display());
        let contents = fs::read_to_string(path)?;
        self.set_in_document(&contents, key, value, path)
    }
}
