use std::fmt::Write;

use crate::SiggenError;
use crate::SiggenResult;
use crate::dialect::Dialect;
use crate::dialect::EnumRender;
use crate::schema::FunctionSchema;
use crate::schema::INTEGER_MAX;
use crate::schema::INTEGER_MIN;
use crate::schema::InputSpec;
use crate::schema::OptInputData;
use crate::schema::OptionalInputSpec;
use crate::schema::OutputKind;
use crate::schema::PriceField;
use crate::schema::REAL_MAX;
use crate::schema::REAL_MIN;

/// Width the type column of required inputs is padded to.
const INPUT_TYPE_WIDTH: usize = 12;

/// Width the type column of optional inputs, out-parameters, and outputs is
/// padded to.
const OPT_TYPE_WIDTH: usize = 13;

/// Which rendering of a function's parameter interface is wanted.
///
/// Lookback phases carry only the optional inputs: the lookback entry point
/// answers how many leading data points the function consumes, which never
/// depends on the data arrays themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	/// Declaration with a trailing semicolon.
	Prototype,
	/// Definition head, no trailing semicolon.
	Definition,
	LookbackPrototype,
	LookbackDefinition,
	/// Call expression forwarding a frame parameter holder to the real
	/// entry point.
	FrameCall,
}

/// One rendered parameter: the declaration (or argument) text and an
/// optional trailing comment. The separator always goes between the two, so
/// `int optInTimePeriod, /* From 2 to 100000 */` comes out right for both
/// middle and last positions.
struct Param {
	decl: String,
	comment: String,
}

impl Param {
	fn plain(decl: String) -> Self {
		Self {
			decl,
			comment: String::new(),
		}
	}
}

/// Renders a function's signature or call expression for one dialect and
/// phase. Parameter order is canonical and invariant: `startIdx, endIdx`,
/// price-bundle components (open, high, low, close, volume, openInterest,
/// timestamp), plain array inputs in schema order, optional inputs in
/// schema order, `outBegIdx, outNBElement`, outputs in schema order.
#[derive(Debug, Clone, Copy)]
pub struct SignatureComposer<'a> {
	schema: &'a FunctionSchema,
	dialect: Dialect,
}

impl<'a> SignatureComposer<'a> {
	pub fn new(schema: &'a FunctionSchema, dialect: Dialect) -> Self {
		Self { schema, dialect }
	}

	/// Render the signature for `phase`. `prefix` is glued verbatim in
	/// front of the first line (export attribute, extra indent, …) and
	/// counts toward the continuation-alignment column.
	pub fn compose(&self, phase: Phase, prefix: &str) -> SiggenResult<String> {
		match phase {
			Phase::Prototype => self.compose_full(prefix, true),
			Phase::Definition => self.compose_full(prefix, false),
			Phase::LookbackPrototype => self.compose_lookback(prefix, true),
			Phase::LookbackDefinition => self.compose_lookback(prefix, false),
			Phase::FrameCall => self.compose_frame_call(prefix),
		}
	}

	/// All parameters of the full (non-lookback) interface, in canonical
	/// order, without the leading `startIdx`/`endIdx` pair.
	fn params_after_indices(&self) -> SiggenResult<Vec<Param>> {
		let profile = self.dialect.profile();
		let mut params = Vec::new();

		for (index, input) in self.schema.inputs.iter().enumerate() {
			match input {
				InputSpec::Price { components, .. } => {
					if components.is_empty() {
						return Err(self.schema_error(index, "price", "no component flagged"));
					}
					for field in components.ordered() {
						let element_type = match field {
							PriceField::Timestamp => profile.int_array_in,
							_ => profile.real_array_in,
						};
						params.push(Param::plain(format!(
							"{:<width$} {}{}",
							element_type,
							field.param_name(),
							profile.array_suffix,
							width = INPUT_TYPE_WIDTH
						)));
					}
				}
				InputSpec::RealArray { param_name } => {
					params.push(Param::plain(format!(
						"{:<width$} {}{}",
						profile.real_array_in,
						param_name,
						profile.array_suffix,
						width = INPUT_TYPE_WIDTH
					)));
				}
				InputSpec::IntegerArray { param_name } => {
					params.push(Param::plain(format!(
						"{:<width$} {}{}",
						profile.int_array_in,
						param_name,
						profile.array_suffix,
						width = INPUT_TYPE_WIDTH
					)));
				}
			}
		}

		for opt_input in &self.schema.opt_inputs {
			if let Some(param) = self.opt_input_param(opt_input) {
				params.push(param);
			}
		}

		let out_sigil = if profile.out_int_by_pointer { "*" } else { " " };
		params.push(Param::plain(format!(
			"{:<width$}{out_sigil}outBegIdx",
			profile.out_int_param,
			width = OPT_TYPE_WIDTH
		)));
		params.push(Param::plain(format!(
			"{:<width$}{out_sigil}outNBElement",
			profile.out_int_param,
			width = OPT_TYPE_WIDTH
		)));

		for output in &self.schema.outputs {
			let element_type = match output.kind {
				OutputKind::RealArray => profile.real_array_out,
				OutputKind::IntegerArray => profile.int_array_out,
			};
			params.push(Param::plain(format!(
				"{:<width$} {}{}",
				element_type,
				output.param_name,
				profile.array_suffix,
				width = OPT_TYPE_WIDTH
			)));
		}

		Ok(params)
	}

	/// Render one optional input parameter, or `None` when the dialect
	/// omits it (enumeration-typed parameter on an enum-less dialect).
	fn opt_input_param(&self, opt_input: &OptionalInputSpec) -> Option<Param> {
		let profile = self.dialect.profile();
		let type_token = if opt_input.data.is_enum_type() {
			match profile.enum_render {
				EnumRender::Named(name) => name,
				EnumRender::Unsupported => return None,
			}
		} else if opt_input.data.is_integer() {
			profile.scalar_int
		} else {
			profile.scalar_real
		};
		Some(Param {
			decl: format!(
				"{:<width$} {}",
				type_token,
				opt_input.param_name,
				width = OPT_TYPE_WIDTH
			),
			comment: self.range_comment(opt_input),
		})
	}

	/// The `/* From X to Y */` comment documenting an optional input's
	/// accepted range. Symbolic extremes render as the dialect's named
	/// constants.
	fn range_comment(&self, opt_input: &OptionalInputSpec) -> String {
		let profile = self.dialect.profile();
		match &opt_input.data {
			OptInputData::RealRange {
				min,
				max,
				precision,
				..
			} => {
				let precision = *precision;
				let lo = if *min <= REAL_MIN {
					profile.real_min.to_string()
				} else {
					format!("{min:.precision$}")
				};
				let hi = if *max >= REAL_MAX {
					profile.real_max.to_string()
				} else {
					format!("{max:.precision$}")
				};
				let percent = if opt_input.flags.percent { " %" } else { "" };
				format!(" /* From {lo} to {hi}{percent} */")
			}
			OptInputData::IntegerRange { min, max, .. } => {
				let lo = if *min <= INTEGER_MIN {
					profile.int_min.to_string()
				} else {
					min.to_string()
				};
				let hi = if *max >= INTEGER_MAX {
					profile.int_max.to_string()
				} else {
					max.to_string()
				};
				format!(" /* From {lo} to {hi} */")
			}
			OptInputData::IntegerList { .. } | OptInputData::RealList { .. } => String::new(),
		}
	}

	/// Render the full-interface signature. The continuation parameters are
	/// aligned under the column that follows the function-name token and
	/// opening parenthesis on the first line; regeneration diff stability
	/// depends on this alignment staying put.
	fn compose_full(&self, prefix: &str, semicolon: bool) -> SiggenResult<String> {
		let profile = self.dialect.profile();
		let func_name = self.dialect.func_name(self.schema);
		let head = format!(
			"{prefix}{}{} {func_name}( ",
			profile.visibility, profile.ret_type
		);
		let indent = " ".repeat(head.len());

		let mut out = String::new();
		let _ = writeln!(
			out,
			"{head}{:<width$} startIdx,",
			profile.scalar_int,
			width = INPUT_TYPE_WIDTH
		);
		let _ = writeln!(
			out,
			"{indent}{:<width$} endIdx,",
			profile.scalar_int,
			width = INPUT_TYPE_WIDTH
		);

		let params = self.params_after_indices()?;
		let last = params.len() - 1;
		let terminator = if semicolon { " );" } else { " )" };
		for (index, param) in params.iter().enumerate() {
			let separator = if index == last { terminator } else { "," };
			let _ = writeln!(out, "{indent}{}{separator}{}", param.decl, param.comment);
		}
		Ok(out)
	}

	/// Render the lookback signature: only the optional inputs survive.
	fn compose_lookback(&self, prefix: &str, semicolon: bool) -> SiggenResult<String> {
		let profile = self.dialect.profile();
		let lookback_name = self.dialect.lookback_name(self.schema);
		let head = format!("{prefix}{}int {lookback_name}( ", profile.visibility);
		let indent = " ".repeat(head.len());
		let semi = if semicolon { ";" } else { "" };

		let params: Vec<Param> = self
			.schema
			.opt_inputs
			.iter()
			.filter_map(|opt_input| self.opt_input_param(opt_input))
			.collect();

		let mut out = String::new();
		if params.is_empty() {
			// C-family dialects spell an empty parameter list `( void )`.
			let inner = match self.dialect {
				Dialect::C | Dialect::CSingle => "void ",
				Dialect::Java | Dialect::DotNet => "",
			};
			let _ = writeln!(out, "{head}{inner}){semi}");
			return Ok(out);
		}

		let last = params.len() - 1;
		for (index, param) in params.iter().enumerate() {
			let lead = if index == 0 { head.as_str() } else { indent.as_str() };
			let separator = if index == last {
				format!(" ){semi}")
			} else {
				",".to_string()
			};
			let _ = writeln!(out, "{lead}{}{separator}{}", param.decl, param.comment);
		}
		Ok(out)
	}

	/// Render the call expression used by the frame glue: every argument is
	/// fetched from the parameter holder, with the original parameter name
	/// kept as a trailing comment.
	fn compose_frame_call(&self, prefix: &str) -> SiggenResult<String> {
		let func_name = self.dialect.func_name(self.schema);
		let head = format!("{prefix}{func_name}( ");
		let indent = " ".repeat(head.len());

		let mut args = vec![
			Param::plain("startIdx".to_string()),
			Param::plain("endIdx".to_string()),
		];

		for (index, input) in self.schema.inputs.iter().enumerate() {
			match input {
				InputSpec::Price { components, .. } => {
					if components.is_empty() {
						return Err(self.schema_error(index, "price", "no component flagged"));
					}
					for field in components.ordered() {
						args.push(Param {
							decl: format!(
								"params->in[{index}].data.inPrice.{}",
								field.holder_field()
							),
							comment: format!(" /* {} */", field.param_name()),
						});
					}
				}
				InputSpec::RealArray { param_name } => {
					args.push(Param {
						decl: format!("params->in[{index}].data.inReal"),
						comment: format!(" /* {param_name} */"),
					});
				}
				InputSpec::IntegerArray { param_name } => {
					args.push(Param {
						decl: format!("params->in[{index}].data.inInteger"),
						comment: format!(" /* {param_name} */"),
					});
				}
			}
		}

		for (index, opt_input) in self.schema.opt_inputs.iter().enumerate() {
			args.push(frame_opt_input_arg(self.dialect, index, opt_input));
		}

		args.push(Param::plain("params->outBegIdx".to_string()));
		args.push(Param::plain("params->outNBElement".to_string()));

		for (index, output) in self.schema.outputs.iter().enumerate() {
			let member = match output.kind {
				OutputKind::RealArray => "outReal",
				OutputKind::IntegerArray => "outInteger",
			};
			args.push(Param {
				decl: format!("params->out[{index}].data.{member}"),
				comment: format!(" /* {} */", output.param_name),
			});
		}

		Ok(join_call_args(&head, &indent, &args))
	}

	/// Call expression for the lookback frame glue. Not a [`Phase`] of its
	/// own: it reuses the frame argument rendering with the reduced
	/// lookback parameter list.
	pub fn compose_frame_lookback_call(&self, prefix: &str) -> String {
		let lookback_name = self.dialect.lookback_name(self.schema);
		let head = format!("{prefix}{lookback_name}( ");
		let indent = " ".repeat(head.len());

		let args: Vec<Param> = self
			.schema
			.opt_inputs
			.iter()
			.enumerate()
			.map(|(index, opt_input)| frame_opt_input_arg(self.dialect, index, opt_input))
			.collect();

		if args.is_empty() {
			return format!("{head})\n");
		}
		join_call_args(&head, &indent, &args)
	}

	/// The `TA_FOO - hint` documentation block placed above definitions.
	pub fn compose_doc_header(&self, comment_prefix: &str) -> String {
		let trimmed = comment_prefix.trim_end();
		let mut out = String::new();
		let _ = writeln!(
			out,
			"{comment_prefix}{} - {}",
			self.dialect.func_name(self.schema),
			self.schema.hint
		);
		let _ = writeln!(out, "{trimmed}");

		let inputs: Vec<String> = self
			.schema
			.inputs
			.iter()
			.map(|input| {
				match input {
					InputSpec::Price { components, .. } => {
						components
							.ordered()
							.iter()
							.map(|field| field.param_name().trim_start_matches("in").to_string())
							.collect::<Vec<_>>()
							.join(", ")
					}
					InputSpec::RealArray { .. } => "double".to_string(),
					InputSpec::IntegerArray { .. } => "int".to_string(),
				}
			})
			.collect();
		let _ = writeln!(out, "{comment_prefix}Input  = {}", inputs.join(", "));

		let outputs: Vec<&str> = self
			.schema
			.outputs
			.iter()
			.map(|output| {
				match output.kind {
					OutputKind::RealArray => "double",
					OutputKind::IntegerArray => "int",
				}
			})
			.collect();
		let _ = writeln!(out, "{comment_prefix}Output = {}", outputs.join(", "));

		if !self.schema.opt_inputs.is_empty() {
			let _ = writeln!(out, "{trimmed}");
			let _ = writeln!(out, "{comment_prefix}Optional Parameters");
			let _ = writeln!(out, "{comment_prefix}-------------------");
			for opt_input in &self.schema.opt_inputs {
				let _ = writeln!(
					out,
					"{comment_prefix}{} - {}",
					opt_input.param_name, opt_input.display_name
				);
				if !opt_input.hint.is_empty() {
					let _ = writeln!(out, "{comment_prefix}   {}", opt_input.hint);
				}
			}
		}
		out
	}

	fn schema_error(&self, param_index: usize, kind: &str, detail: &str) -> SiggenError {
		SiggenError::Schema {
			function: self.schema.name.clone(),
			param_index,
			kind: kind.to_string(),
			detail: detail.to_string(),
		}
	}
}

fn frame_opt_input_arg(dialect: Dialect, index: usize, opt_input: &OptionalInputSpec) -> Param {
	let (cast, member) = match &opt_input.data {
		OptInputData::IntegerList { is_enum_type: true, .. } => {
			let cast = match dialect.profile().enum_render {
				EnumRender::Named(enum_name) => format!("({enum_name})"),
				EnumRender::Unsupported => String::new(),
			};
			(cast, "optInInteger")
		}
		OptInputData::IntegerList { .. } | OptInputData::IntegerRange { .. } => {
			(String::new(), "optInInteger")
		}
		OptInputData::RealRange { .. } | OptInputData::RealList { .. } => {
			(String::new(), "optInReal")
		}
	};
	Param {
		decl: format!("{cast}params->optIn[{index}].data.{member}"),
		comment: format!(" /* {} */", opt_input.param_name),
	}
}

fn join_call_args(head: &str, indent: &str, args: &[Param]) -> String {
	let mut out = String::new();
	let last = args.len() - 1;
	for (index, arg) in args.iter().enumerate() {
		let lead = if index == 0 { head } else { indent };
		if index == last {
			let _ = writeln!(out, "{lead}{}{} )", arg.decl, arg.comment);
		} else {
			let _ = writeln!(out, "{lead}{},{}", arg.decl, arg.comment);
		}
	}
	out
}
