use std::fs;
use std::path::PathBuf;

use crate::SiggenResult;

/// What a [`ChangeGuard::commit`] did to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Committed {
	Created,
	Updated,
	/// The target already held exactly this content; nothing was written
	/// and its modification time is untouched.
	Unchanged,
}

/// Writes an artifact only when its content actually changed.
///
/// Rewriting identical bytes would bump the modification time and trigger
/// spurious rebuilds in anything watching the output tree, so the guard
/// compares first and leaves unchanged targets alone. Every write goes
/// through a sibling temp file and a rename, never a partial in-place
/// write.
#[derive(Debug, Clone)]
pub struct ChangeGuard {
	target: PathBuf,
}

impl ChangeGuard {
	pub fn new(target: impl Into<PathBuf>) -> Self {
		Self {
			target: target.into(),
		}
	}

	/// True when committing `content` would create or rewrite the target.
	pub fn would_change(&self, content: &str) -> SiggenResult<bool> {
		if !self.target.exists() {
			return Ok(true);
		}
		let existing = fs::read(&self.target)?;
		Ok(existing != content.as_bytes())
	}

	pub fn commit(&self, content: &str) -> SiggenResult<Committed> {
		if !self.target.exists() {
			if let Some(parent) = self.target.parent() {
				fs::create_dir_all(parent)?;
			}
			self.promote(content)?;
			return Ok(Committed::Created);
		}
		let existing = fs::read(&self.target)?;
		if existing == content.as_bytes() {
			return Ok(Committed::Unchanged);
		}
		self.promote(content)?;
		Ok(Committed::Updated)
	}

	/// Stage the candidate in a sibling temp file, then rename it over the
	/// target.
	fn promote(&self, content: &str) -> SiggenResult<()> {
		let tmp = self.tmp_path();
		fs::write(&tmp, content)?;
		fs::rename(&tmp, &self.target)?;
		Ok(())
	}

	fn tmp_path(&self) -> PathBuf {
		let mut name = self
			.target
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_default();
		name.push_str(".tmp");
		self.target.with_file_name(name)
	}
}
