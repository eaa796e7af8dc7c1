use std::fmt;
use std::path::Path;

use crate::SiggenError;
use crate::SiggenResult;

/// Placeholder line marking where generated content goes in a template.
pub const GENCODE_MARKER: &str = "%%%GENCODE%%%";

/// Prefix of the line that opens a generated region in an emitted file.
pub const SECTION_START: &str = "/**** START GENCODE SECTION";

/// Prefix of the line that closes a generated region in an emitted file.
pub const SECTION_END: &str = "/**** END GENCODE SECTION";

/// An artifact being assembled from a template and generated content.
///
/// Opening with a template copies every line up to the first
/// [`GENCODE_MARKER`] into the output and consumes the marker. Generated
/// lines are then appended through [`fmt::Write`]; [`skip_to_marker`]
/// advances to the next region for multi-region templates, and
/// [`finish`] flushes the template tail.
///
/// [`skip_to_marker`]: GeneratedFile::skip_to_marker
/// [`finish`]: GeneratedFile::finish
#[derive(Debug)]
pub struct GeneratedFile {
	template: Vec<String>,
	cursor: usize,
	origin: String,
	out: String,
}

impl GeneratedFile {
	/// Open against a template. Hand-written content before the first
	/// marker is copied through immediately.
	pub fn from_template_str(template: &str, origin: impl Into<String>) -> SiggenResult<Self> {
		let mut file = Self {
			template: template.lines().map(str::to_string).collect(),
			cursor: 0,
			origin: origin.into(),
			out: String::new(),
		};
		file.skip_to_marker()?;
		Ok(file)
	}

	pub fn from_template_path(path: &Path) -> SiggenResult<Self> {
		let template =
			std::fs::read_to_string(path).map_err(|_| {
				SiggenError::MissingTemplate {
					path: path.display().to_string(),
				}
			})?;
		Self::from_template_str(&template, path.display().to_string())
	}

	/// Open without a template. The whole file is machine-owned and the
	/// output is exactly what gets written to it.
	pub fn machine_owned(origin: impl Into<String>) -> Self {
		Self {
			template: Vec::new(),
			cursor: 0,
			origin: origin.into(),
			out: String::new(),
		}
	}

	/// Copy template lines through until the next marker, consuming it.
	/// Losing a marker is fatal for the artifact: without it the generated
	/// region cannot be located.
	pub fn skip_to_marker(&mut self) -> SiggenResult<()> {
		while self.cursor < self.template.len() {
			let line = &self.template[self.cursor];
			self.cursor += 1;
			if line.contains(GENCODE_MARKER) {
				return Ok(());
			}
			self.out.push_str(line);
			self.out.push('\n');
		}
		Err(SiggenError::MissingMarker {
			file: self.origin.clone(),
		})
	}

	/// Copy the remaining template tail and return the assembled content.
	pub fn finish(mut self) -> String {
		while self.cursor < self.template.len() {
			self.out.push_str(&self.template[self.cursor]);
			self.out.push('\n');
			self.cursor += 1;
		}
		self.out
	}
}

impl fmt::Write for GeneratedFile {
	fn write_str(&mut self, s: &str) -> fmt::Result {
		self.out.push_str(s);
		Ok(())
	}
}

/// Derive a template from an existing generated file by emptying every
/// generated region back to a single marker line. The region delimiter
/// lines themselves stay in the template so they survive regeneration.
pub fn derive_template(generated: &str) -> String {
	let mut out = String::new();
	let mut lines = generated.lines();
	while let Some(line) = lines.next() {
		out.push_str(line);
		out.push('\n');
		if line.trim_start().starts_with(SECTION_START) {
			out.push_str(GENCODE_MARKER);
			out.push('\n');
			for skipped in lines.by_ref() {
				if skipped.trim_start().starts_with(SECTION_END) {
					out.push_str(skipped);
					out.push('\n');
					break;
				}
			}
		}
	}
	out
}
