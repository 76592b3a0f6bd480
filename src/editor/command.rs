use crate::editor::StructuredFileEditor;
use crate::error::{ReleaseError, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Default external editor program
pub const DEFAULT_PROGRAM: &str = "toml";

/// Default argument template, `toml set <path> <key> <value>`
pub fn default_args() -> Vec<String> {
    vec![
        "set".to_string(),
        "{path}".to_string(),
        "{key}".to_string(),
        "{value}".to_string(),
    ]
}

/// Edits files by running an external rewriting tool
///
/// The tool must print the rewritten document on stdout. Placeholders
/// `{path}`, `{key}` and `{value}` in the argument template are substituted
/// per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEditor {
    program: String,
    args: Vec<String>,
}

impl CommandEditor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandEditor {
            program: program.into(),
            args,
        }
    }

    /// Arguments for one invocation with placeholders filled in
    pub fn render_args(&self, path: &Path, key: &str, value: &str) -> Vec<String> {
        let path = path.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{path}", &path)
                    .replace("{key}", key)
                    .replace("{value}", value)
            })
            .collect()
    }
}

impl Default for CommandEditor {
    fn default() -> Self {
        CommandEditor::new(DEFAULT_PROGRAM, default_args())
    }
}

impl StructuredFileEditor for CommandEditor {
    fn set_value(&self, path: &Path, key: &str, value: &str) -> Result<String> {
        let args = self.render_args(path, key, value);
        let command_line = format!("{} {}", self.program, args.join(" "));
        debug!("Running {}", command_line);

        let output = Command::new(&self.program).args(&args).output().map_err(|e| {
            ReleaseError::ExternalCommand {
                command: command_line.clone(),
                code: None,
                stderr: format!("failed to start: {}", e),
            }
        })?;

        if !output.status.success() {
            return Err(ReleaseError::ExternalCommand {
                command: command_line,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| {
            ReleaseError::edit(path, format!("`{}` produced non UTF-8 output", self.program))
        })
    }
}
