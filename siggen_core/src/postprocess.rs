use std::path::Path;
use std::process::Command;

use crate::SiggenError;
use crate::SiggenResult;

/// Runs the configured external preprocessor over an emitted artifact and
/// cleans up its output.
///
/// The tool is invoked with the configured arguments plus the artifact
/// path, and its stdout becomes the artifact's final content. Preprocessors
/// leave behind blank lines and stray `;` lines where macros expanded to
/// nothing; those are filtered out.
#[derive(Debug, Clone)]
pub struct Postprocessor {
	command: String,
	args: Vec<String>,
}

impl Postprocessor {
	pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
		Self {
			command: command.into(),
			args,
		}
	}

	pub fn run(&self, input: &Path) -> SiggenResult<String> {
		let output = Command::new(&self.command)
			.args(&self.args)
			.arg(input)
			.output()
			.map_err(|e| {
				SiggenError::ExternalTool {
					tool: self.command.clone(),
					reason: e.to_string(),
				}
			})?;
		if !output.status.success() {
			return Err(SiggenError::ExternalTool {
				tool: self.command.clone(),
				reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			});
		}
		let text = String::from_utf8_lossy(&output.stdout);
		Ok(filter_preprocessed(&text))
	}
}

/// Drop blank lines and lines holding nothing but a terminating `;`.
pub fn filter_preprocessed(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for line in text.lines() {
		let trimmed = line.trim();
		if trimmed.is_empty() || trimmed == ";" {
			continue;
		}
		out.push_str(line);
		out.push('\n');
	}
	out
}
