//! Structured file editing
//!
//! The release driver sets one key path (by default `package.version`) in each
//! target file through the [StructuredFileEditor] trait. Editors return the
//! rewritten document; writing it back is left to the caller so a dry run can
//! exercise the edit without touching the file.
//!
//! - [document::TomlEditor]: in-process, formatting-preserving (`toml_edit`)
//! - [command::CommandEditor]: delegates to an external tool such as `toml set`

pub mod command;
pub mod document;

pub use command::CommandEditor;
pub use document::TomlEditor;

use crate::config::EditorConfig;
use crate::error::Result;
use std::path::Path;

/// Sets a dotted key path to a string value in a structured file
pub trait StructuredFileEditor {
    /// Return the contents of `path` with `key` (e.g. `package.version`) set
    /// to `value`. The file itself is not modified.
    fn set_value(&self, path: &Path, key: &str, value: &str) -> Result<String>;
}

impl<E: StructuredFileEditor + ?Sized> StructuredFileEditor for Box<E> {
    fn set_value(&self, path: &Path, key: &str, value: &str) -> Result<String> {
        (**self).set_value(path, key, value)
    }
}

/// Build the editor selected by configuration
pub fn from_config(config: &EditorConfig) -> Box<dyn StructuredFileEditor> {
    match config {
        EditorConfig::Builtin => Box::new(TomlEditor),
        EditorConfig::Command { program, args } => {
            Box::new(CommandEditor::new(program.clone(), args.clone()))
        }
    }
}
