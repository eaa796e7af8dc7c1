use std::path::Path;

use serde::Deserialize;

use crate::SiggenError;
use crate::SiggenResult;
use crate::schema::FunctionSchema;

/// Read-only source of function schemas. The core only consumes this
/// enumeration; it neither defines nor persists it. Implementations must
/// return functions in a stable, deterministic order so that two runs over
/// the same registry produce byte-identical artifacts.
pub trait Registry {
	fn functions(&self) -> &[FunctionSchema];

	/// All distinct group names, in first-appearance order.
	fn groups(&self) -> Vec<&str> {
		let mut groups: Vec<&str> = Vec::new();
		for func in self.functions() {
			if !groups.contains(&func.group.as_str()) {
				groups.push(&func.group);
			}
		}
		groups
	}
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
	#[serde(default, rename = "function")]
	functions: Vec<FunctionSchema>,
}

/// A registry deserialized from a TOML function table. File order is
/// preserved, which gives the stable enumeration order the emitters need.
#[derive(Debug)]
pub struct TableRegistry {
	functions: Vec<FunctionSchema>,
}

impl TableRegistry {
	/// Parse a function table from TOML text. Every schema is validated on
	/// load so malformed entries surface before any file is touched.
	pub fn from_toml_str(input: &str, origin: &str) -> SiggenResult<Self> {
		let file: RegistryFile =
			toml::from_str(input).map_err(|e| {
				SiggenError::RegistryParse {
					path: origin.to_string(),
					reason: e.to_string(),
				}
			})?;
		for func in &file.functions {
			func.validate()?;
		}
		Ok(Self {
			functions: file.functions,
		})
	}

	pub fn from_path(path: &Path) -> SiggenResult<Self> {
		let input = std::fs::read_to_string(path)?;
		Self::from_toml_str(&input, &path.display().to_string())
	}
}

impl Registry for TableRegistry {
	fn functions(&self) -> &[FunctionSchema] {
		&self.functions
	}
}
