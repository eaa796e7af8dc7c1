use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::SiggenError;
use crate::SiggenResult;

/// Locations probed for the configuration file, relative to the project
/// root, in priority order.
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["siggen.toml", ".siggen.toml", ".config/siggen.toml"];

/// Which dialect families a run emits. Everything defaults to on; a
/// project that cannot run the managed-interface preprocessor typically
/// turns `dotnet` off instead of installing it.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectToggles {
	pub c: bool,
	pub java: bool,
	pub dotnet: bool,
}

impl Default for DialectToggles {
	fn default() -> Self {
		Self {
			c: true,
			java: true,
			dotnet: true,
		}
	}
}

/// External preprocessor invocation for artifacts that need one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostprocessConfig {
	pub command: String,
	pub args: Vec<String>,
}

/// Project configuration, loaded from `siggen.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiggenConfig {
	/// Path of the TOML function table, relative to the project root.
	pub functions: PathBuf,
	/// Directory the artifacts are written into.
	pub output: PathBuf,
	/// Directory holding the hand-maintained templates.
	pub templates: PathBuf,
	pub dialects: DialectToggles,
	pub postprocess: Option<PostprocessConfig>,
}

impl Default for SiggenConfig {
	fn default() -> Self {
		Self {
			functions: PathBuf::from("functions.toml"),
			output: PathBuf::from("generated"),
			templates: PathBuf::from("templates"),
			dialects: DialectToggles::default(),
			postprocess: None,
		}
	}
}

impl SiggenConfig {
	pub fn from_toml_str(input: &str) -> SiggenResult<Self> {
		toml::from_str(input).map_err(|e| SiggenError::ConfigParse(e.to_string()))
	}

	/// Probe the root for a config file. A project without one gets the
	/// defaults, so `siggen generate` works in a bare checkout.
	pub fn discover(root: &Path) -> SiggenResult<Self> {
		for candidate in CONFIG_FILE_CANDIDATES {
			let path = root.join(candidate);
			if path.is_file() {
				let input = std::fs::read_to_string(&path)?;
				return Self::from_toml_str(&input);
			}
		}
		Ok(Self::default())
	}

	pub fn functions_path(&self, root: &Path) -> PathBuf {
		root.join(&self.functions)
	}

	pub fn output_dir(&self, root: &Path) -> PathBuf {
		root.join(&self.output)
	}

	pub fn templates_dir(&self, root: &Path) -> PathBuf {
		root.join(&self.templates)
	}
}
