use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use crate::SiggenError;
use crate::SiggenResult;
use crate::compose::Phase;
use crate::compose::SignatureComposer;
use crate::config::SiggenConfig;
use crate::dialect::Dialect;
use crate::extract::extract_logic;
use crate::extract::extract_lookback_logic;
use crate::guard::ChangeGuard;
use crate::guard::Committed;
use crate::merge::GeneratedFile;
use crate::merge::derive_template;
use crate::postprocess::Postprocessor;
use crate::registry::Registry;
use crate::schema::FunctionSchema;
use crate::validate::ValidationEmitter;

/// Whether a run writes artifacts or only reports what it would write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
	Generate,
	Check,
}

/// One target a check run found out of date, with the content a generate
/// run would have written.
#[derive(Debug)]
pub struct StaleArtifact {
	pub path: PathBuf,
	pub expected: String,
}

/// Outcome of one generation session.
#[derive(Debug, Default)]
pub struct RunSummary {
	pub created: Vec<PathBuf>,
	pub updated: Vec<PathBuf>,
	pub unchanged: usize,
	/// Targets a check run found out of date.
	pub stale: Vec<StaleArtifact>,
	/// Functions or artifacts skipped with a warning.
	pub skipped: Vec<String>,
}

impl RunSummary {
	/// True when a check run found every target up to date.
	pub fn is_clean(&self) -> bool {
		self.stale.is_empty()
	}
}

/// One generation run over a registry: owns the configuration, walks the
/// functions at most twice, and commits every artifact through a
/// [`ChangeGuard`]. Single-threaded by design; the artifacts cross-reference
/// each other and a stable order is part of the output contract.
pub struct GenSession<'a> {
	registry: &'a dyn Registry,
	config: &'a SiggenConfig,
	root: PathBuf,
	mode: RunMode,
	summary: RunSummary,
}

impl<'a> GenSession<'a> {
	pub fn new(
		registry: &'a dyn Registry,
		config: &'a SiggenConfig,
		root: impl Into<PathBuf>,
		mode: RunMode,
	) -> Self {
		Self {
			registry,
			config,
			root: root.into(),
			mode,
			summary: RunSummary::default(),
		}
	}

	pub fn run(mut self) -> SiggenResult<RunSummary> {
		if self.config.dialects.c {
			self.emit_func_header()?;
			self.emit_function_files()?;
			self.emit_frame_header()?;
			self.emit_frame_impl()?;
		}
		if self.config.dialects.java {
			self.emit_java_core()?;
		}
		if self.config.dialects.dotnet {
			self.emit_dotnet_core()?;
		}
		self.emit_func_list()?;
		Ok(self.summary)
	}

	fn output_path(&self, relative: &str) -> PathBuf {
		self.config.output_dir(&self.root).join(relative)
	}

	fn template_path(&self, name: &str) -> PathBuf {
		self.config.templates_dir(&self.root).join(name)
	}

	fn commit(&mut self, target: PathBuf, content: &str) -> SiggenResult<()> {
		let guard = ChangeGuard::new(&target);
		match self.mode {
			RunMode::Check => {
				if guard.would_change(content)? {
					debug!(target = %target.display(), "out of date");
					self.summary.stale.push(StaleArtifact {
						path: target,
						expected: content.to_string(),
					});
				} else {
					self.summary.unchanged += 1;
				}
			}
			RunMode::Generate => {
				match guard.commit(content)? {
					Committed::Created => {
						debug!(target = %target.display(), "created");
						self.summary.created.push(target);
					}
					Committed::Updated => {
						debug!(target = %target.display(), "updated");
						self.summary.updated.push(target);
					}
					Committed::Unchanged => self.summary.unchanged += 1,
				}
			}
		}
		Ok(())
	}

	/// The C header with every exported prototype. Load-bearing: a schema
	/// error here halts the whole run, since every other artifact refers to
	/// the functions this header declares.
	fn emit_func_header(&mut self) -> SiggenResult<()> {
		let mut file = GeneratedFile::from_template_path(&self.template_path("func.h.template"))?;
		let mut current_group = String::new();

		for schema in self.registry.functions() {
			if schema.group != current_group {
				current_group = schema.group.clone();
				let _ = writeln!(file, "\n/******************************************");
				let _ = writeln!(file, " * Group: [{current_group}]");
				let _ = writeln!(file, " ******************************************/\n");
			}
			let composer = SignatureComposer::new(schema, Dialect::C);
			let _ = writeln!(file, "/*");
			let _ = write!(file, "{}", composer.compose_doc_header(" * "));
			let _ = writeln!(file, " */");
			let _ = write!(file, "{}", composer.compose(Phase::Prototype, "TA_LIB_API ")?);
			let _ = writeln!(file);
			let _ = write!(
				file,
				"{}",
				composer.compose(Phase::LookbackPrototype, "TA_LIB_API ")?
			);
			let _ = writeln!(file);
			let single = SignatureComposer::new(schema, Dialect::CSingle);
			let _ = write!(file, "{}", single.compose(Phase::Prototype, "TA_LIB_API ")?);
			let _ = writeln!(file);
		}

		let content = file.finish();
		self.commit(self.output_path("include/func.h"), &content)
	}

	/// The per-function C files. Two-pass: an existing file is first turned
	/// back into a template (its generated sections emptied to markers) so
	/// the hand-written bodies ride along untouched; a new function starts
	/// from the stock function template. A schema error skips just that
	/// function.
	fn emit_function_files(&mut self) -> SiggenResult<()> {
		let registry = self.registry;
		for schema in registry.functions() {
			match self.compose_function_file(schema) {
				Ok((target, content)) => self.commit(target, &content)?,
				Err(err @ SiggenError::Schema { .. }) => {
					warn!(function = %schema.name, "{err}");
					self.summary.skipped.push(schema.name.clone());
				}
				Err(other) => return Err(other),
			}
		}
		Ok(())
	}

	fn function_file_path(&self, schema: &FunctionSchema) -> PathBuf {
		self.output_path(&format!("src/func/ta_{}.c", schema.name))
	}

	/// The template and body source for one function file: the existing
	/// generated file when there is one, the stock template otherwise.
	fn function_file_inputs(&self, schema: &FunctionSchema) -> SiggenResult<(String, String)> {
		let target = self.function_file_path(schema);
		if target.is_file() {
			let existing = fs::read_to_string(&target)?;
			let template = derive_template(&existing);
			Ok((template, existing))
		} else {
			let path = self.template_path("func.c.template");
			let stock =
				fs::read_to_string(&path).map_err(|_| {
					SiggenError::MissingTemplate {
						path: path.display().to_string(),
					}
				})?;
			Ok((stock.clone(), stock))
		}
	}

	fn compose_function_file(&self, schema: &FunctionSchema) -> SiggenResult<(PathBuf, String)> {
		let target = self.function_file_path(schema);
		let origin = target.display().to_string();
		let (template, source) = self.function_file_inputs(schema)?;
		let mut file = GeneratedFile::from_template_str(&template, &origin)?;

		let composer = SignatureComposer::new(schema, Dialect::C);
		let validator = ValidationEmitter::new(schema, Dialect::C);

		// Section 1: warning banner and includes.
		let _ = writeln!(file, "/* All code within this section is automatically");
		let _ = writeln!(file, " * generated by siggen. Any modification will be lost");
		let _ = writeln!(file, " * the next time siggen is run.");
		let _ = writeln!(file, " */");
		let _ = writeln!(file);
		let _ = writeln!(file, "#include \"ta_func.h\"");
		let _ = writeln!(file, "#include \"ta_utility.h\"");
		file.skip_to_marker()?;

		// Section 2: lookback head, opening brace, range checks. The hand
		// lookback body follows the section and supplies the closing brace.
		let _ = write!(file, "{}", composer.compose(Phase::LookbackDefinition, "")?);
		let _ = writeln!(file, "{{");
		let _ = writeln!(file, "#ifndef TA_FUNC_NO_RANGE_CHECK");
		let _ = write!(file, "{}", validator.emit(true)?);
		let _ = writeln!(file, "#endif /* TA_FUNC_NO_RANGE_CHECK */");
		file.skip_to_marker()?;

		// Section 3: doc header, definition head, opening brace, validation.
		let _ = writeln!(file, "/*");
		let _ = write!(file, "{}", composer.compose_doc_header(" * "));
		let _ = writeln!(file, " */");
		let _ = write!(file, "{}", composer.compose(Phase::Definition, "")?);
		let _ = writeln!(file, "{{");
		self.write_range_check_block(&mut file, &validator)?;
		file.skip_to_marker()?;

		// Section 4: the single-precision variant, its body copied from the
		// hand-written double-precision body.
		let single = SignatureComposer::new(schema, Dialect::CSingle);
		let single_validator = ValidationEmitter::new(schema, Dialect::CSingle);
		let _ = writeln!(file, "#define USE_SINGLE_PRECISION_INPUT");
		let _ = writeln!(file);
		let _ = write!(file, "{}", single.compose(Phase::Definition, "")?);
		let _ = writeln!(file, "{{");
		self.write_range_check_block(&mut file, &single_validator)?;
		let _ = write!(file, "{}", extract_logic(&source, &origin)?);
		let _ = writeln!(file);
		let _ = writeln!(file, "#undef USE_SINGLE_PRECISION_INPUT");

		Ok((target, file.finish()))
	}

	/// The `#ifndef TA_FUNC_NO_RANGE_CHECK` block opening a C function body:
	/// output-range checks on the index pair, then the parameter checks.
	fn write_range_check_block(
		&self,
		file: &mut GeneratedFile,
		validator: &ValidationEmitter<'_>,
	) -> SiggenResult<()> {
		let _ = writeln!(file, "#ifndef TA_FUNC_NO_RANGE_CHECK");
		let _ = writeln!(file);
		let _ = writeln!(file, "   /* Validate the requested output range. */");
		let _ = writeln!(file, "   if( startIdx < 0 )");
		let _ = writeln!(file, "      return TA_OUT_OF_RANGE_START_INDEX;");
		let _ = writeln!(file, "   if( (endIdx < 0) || (endIdx < startIdx))");
		let _ = writeln!(file, "      return TA_OUT_OF_RANGE_END_INDEX;");
		let _ = writeln!(file);
		let _ = write!(file, "{}", validator.emit(false)?);
		let _ = writeln!(file, "#endif /* TA_FUNC_NO_RANGE_CHECK */");
		let _ = writeln!(file);
		Ok(())
	}

	fn emit_frame_header(&mut self) -> SiggenResult<()> {
		let mut file = GeneratedFile::from_template_path(&self.template_path("frame.h.template"))?;
		for schema in self.registry.functions() {
			let name = Dialect::C.func_name(schema);
			let _ = writeln!(
				file,
				"TA_RetCode {name}_FramePP( const TA_ParamHolderPriv *params, int startIdx, int \
				 endIdx );"
			);
			let _ = writeln!(
				file,
				"unsigned int {name}_FrameLookback( const TA_ParamHolderPriv *params );"
			);
		}
		let content = file.finish();
		self.commit(self.output_path("frames/frame.h"), &content)
	}

	fn emit_frame_impl(&mut self) -> SiggenResult<()> {
		let mut file = GeneratedFile::from_template_path(&self.template_path("frame.c.template"))?;
		for schema in self.registry.functions() {
			let composer = SignatureComposer::new(schema, Dialect::C);
			let name = Dialect::C.func_name(schema);

			let _ = writeln!(
				file,
				"TA_RetCode {name}_FramePP( const TA_ParamHolderPriv *params,"
			);
			let pad = " ".repeat(format!("TA_RetCode {name}_FramePP( ").len());
			let _ = writeln!(file, "{pad}int startIdx,");
			let _ = writeln!(file, "{pad}int endIdx )");
			let _ = writeln!(file, "{{");
			let call = composer.compose(Phase::FrameCall, "   return ")?;
			let _ = writeln!(file, "{};", call.trim_end());
			let _ = writeln!(file, "}}");
			let _ = writeln!(file);

			let _ = writeln!(
				file,
				"unsigned int {name}_FrameLookback( const TA_ParamHolderPriv *params )"
			);
			let _ = writeln!(file, "{{");
			let lookback_call = composer.compose_frame_lookback_call("   return ");
			let _ = writeln!(file, "{};", lookback_call.trim_end());
			let _ = writeln!(file, "}}");
			let _ = writeln!(file);
		}
		let content = file.finish();
		self.commit(self.output_path("frames/frame.c"), &content)
	}

	/// The Java core class. Two owned regions: lookback methods first, then
	/// the indicator methods. Bodies are the hand-written C bodies, pulled
	/// through the logic extractor.
	fn emit_java_core(&mut self) -> SiggenResult<()> {
		let mut file = GeneratedFile::from_template_path(&self.template_path("Core.java.template"))?;
		let registry = self.registry;

		for schema in registry.functions() {
			match self.compose_java_lookback(schema) {
				Ok(text) => {
					let _ = write!(file, "{text}");
				}
				Err(err @ SiggenError::Schema { .. }) => {
					warn!(function = %schema.name, "{err}");
					self.summary.skipped.push(schema.name.clone());
				}
				Err(other) => return Err(other),
			}
		}
		file.skip_to_marker()?;
		for schema in registry.functions() {
			match self.compose_java_indicator(schema) {
				Ok(text) => {
					let _ = write!(file, "{text}");
				}
				Err(err @ SiggenError::Schema { .. }) => {
					warn!(function = %schema.name, "{err}");
				}
				Err(other) => return Err(other),
			}
		}

		let content = file.finish();
		self.commit(self.output_path("java/Core.java"), &content)
	}

	fn compose_java_lookback(&self, schema: &FunctionSchema) -> SiggenResult<String> {
		let origin = self.function_file_path(schema).display().to_string();
		let (_, source) = self.function_file_inputs(schema)?;
		let composer = SignatureComposer::new(schema, Dialect::Java);
		let validator = ValidationEmitter::new(schema, Dialect::Java);

		let mut out = String::new();
		let _ = write!(out, "{}", composer.compose(Phase::LookbackDefinition, "   ")?);
		let _ = writeln!(out, "   {{");
		let _ = write!(out, "{}", validator.emit(true)?);
		let _ = write!(out, "{}", extract_lookback_logic(&source, &origin)?);
		let _ = writeln!(out);
		Ok(out)
	}

	fn compose_java_indicator(&self, schema: &FunctionSchema) -> SiggenResult<String> {
		let origin = self.function_file_path(schema).display().to_string();
		let (_, source) = self.function_file_inputs(schema)?;
		let composer = SignatureComposer::new(schema, Dialect::Java);
		let validator = ValidationEmitter::new(schema, Dialect::Java);

		let mut out = String::new();
		let _ = writeln!(out, "   /*");
		let _ = write!(out, "{}", composer.compose_doc_header("    * "));
		let _ = writeln!(out, "    */");
		let _ = write!(out, "{}", composer.compose(Phase::Definition, "   ")?);
		let _ = writeln!(out, "   {{");
		let _ = write!(out, "{}", validator.emit(false)?);
		let _ = write!(out, "{}", extract_logic(&source, &origin)?);
		let _ = writeln!(out);
		Ok(out)
	}

	/// The managed-interface header. One owned region of prototypes, then
	/// the whole artifact goes through the configured external preprocessor.
	/// A missing or failing tool downgrades to a warning and the artifact is
	/// skipped; everything else in the run still completes.
	fn emit_dotnet_core(&mut self) -> SiggenResult<()> {
		let mut file = GeneratedFile::from_template_path(&self.template_path("core.h.template"))?;
		for schema in self.registry.functions() {
			let composer = SignatureComposer::new(schema, Dialect::DotNet);
			let _ = write!(file, "{}", composer.compose(Phase::Prototype, "         ")?);
			let _ = write!(
				file,
				"{}",
				composer.compose(Phase::LookbackPrototype, "         ")?
			);
			let _ = writeln!(file);
		}
		let mut content = file.finish();

		if Dialect::DotNet.profile().needs_postprocess {
			if let Some(pp) = &self.config.postprocess {
				let tool = Postprocessor::new(&pp.command, pp.args.clone());
				match self.run_postprocess(&tool, &content) {
					Ok(processed) => content = processed,
					Err(err) => {
						warn!("{err}");
						self.summary.skipped.push("dotnet/core.h".to_string());
						return Ok(());
					}
				}
			}
		}

		self.commit(self.output_path("dotnet/core.h"), &content)
	}

	fn run_postprocess(&self, tool: &Postprocessor, content: &str) -> SiggenResult<String> {
		let staging = std::env::temp_dir().join(format!("siggen-pp-{}.h", std::process::id()));
		fs::write(&staging, content)?;
		let result = tool.run(&staging);
		let _ = fs::remove_file(&staging);
		result
	}

	/// The function list: fully machine-owned, no template, one line per
	/// function with its group.
	fn emit_func_list(&mut self) -> SiggenResult<()> {
		let mut file = GeneratedFile::machine_owned("func_list.txt");
		for schema in self.registry.functions() {
			let _ = writeln!(file, "{}\t{}", schema.name, schema.group);
		}
		let content = file.finish();
		self.commit(self.output_path("func_list.txt"), &content)
	}
}

impl std::fmt::Debug for GenSession<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GenSession")
			.field("root", &self.root)
			.field("mode", &self.mode)
			.finish_non_exhaustive()
	}
}

/// Run one full session over a project root: discover the config, load the
/// registry, generate or check every enabled artifact.
pub fn run_session(root: &Path, mode: RunMode) -> SiggenResult<RunSummary> {
	let config = SiggenConfig::discover(root)?;
	let registry = crate::registry::TableRegistry::from_path(&config.functions_path(root))?;
	GenSession::new(&registry, &config, root, mode).run()
}
