use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SiggenError {
	#[error(transparent)]
	#[diagnostic(code(siggen::io_error))]
	Io(#[from] std::io::Error),

	#[error("[{function},{param_index}] invalid `{kind}` information: {detail}")]
	#[diagnostic(
		code(siggen::schema),
		help("fix the function table entry; only this artifact is aborted")
	)]
	Schema {
		function: String,
		param_index: usize,
		kind: String,
		detail: String,
	},

	#[error("line with `%%%GENCODE%%%` marker missing in [{file}]")]
	#[diagnostic(
		code(siggen::missing_marker),
		help(
			"the hand-maintained file lost a generated-region marker; restore it from version \
			 control before regenerating"
		)
	)]
	MissingMarker { file: String },

	#[error("cannot locate the logic section in [{file}]")]
	#[diagnostic(
		code(siggen::missing_logic),
		help("the file lost one of its generated-section delimiter lines")
	)]
	MissingLogic { file: String },

	#[error("cannot open template [{path}]")]
	#[diagnostic(code(siggen::missing_template))]
	MissingTemplate { path: String },

	#[error("post-processing tool `{tool}` failed: {reason}")]
	#[diagnostic(
		code(siggen::external_tool),
		help("install the tool or disable the [postprocess] section; the artifact is skipped")
	)]
	ExternalTool { tool: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(siggen::config_parse),
		help("check that siggen.toml is valid TOML with [dialects] and/or [postprocess] sections")
	)]
	ConfigParse(String),

	#[error("failed to parse function table `{path}`: {reason}")]
	#[diagnostic(code(siggen::registry_parse))]
	RegistryParse { path: String, reason: String },
}

pub type SiggenResult<T> = Result<T, SiggenError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
