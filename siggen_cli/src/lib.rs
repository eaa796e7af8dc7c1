use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Regenerate multi-language interface code from a function registry.",
	long_about = "siggen is a schema-driven code generator. A TOML registry describes each \
	              function's calling interface once; siggen renders it into every configured \
	              target dialect, merging the generated regions into hand-maintained files and \
	              leaving hand-written algorithm bodies untouched.\n\nQuick start:\n  siggen \
	              generate  Regenerate every artifact\n  siggen check     Verify artifacts are up \
	              to date\n  siggen list      Show the functions in the registry"
)]
pub struct SiggenCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Regenerate every artifact from the function registry.
	///
	/// Loads `functions.toml`, renders each enabled dialect, and rewrites
	/// only the artifacts whose content actually changed. Hand-written
	/// algorithm bodies inside generated files are carried over verbatim;
	/// only the marked generated sections are replaced.
	Generate {
		/// Preview changes without writing files. Prints which artifacts
		/// would be created or rewritten.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Limit the run to the named dialect families. May be repeated;
		/// overrides the `[dialects]` toggles in the configuration.
		#[arg(long, value_parser = ["c", "java", "dotnet"])]
		dialect: Vec<String>,
	},
	/// Check that every generated artifact is up to date.
	///
	/// Renders everything in memory and compares against the files on
	/// disk. Exits with a non-zero status code when any artifact is out of
	/// date. Ideal for CI pipelines.
	Check {
		/// Show a unified diff for each out-of-date artifact.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// List the functions and groups in the registry.
	List,
}
