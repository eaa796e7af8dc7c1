use std::fmt::Write;

use crate::SiggenResult;
use crate::dialect::Dialect;
use crate::dialect::EnumRender;
use crate::schema::FunctionSchema;
use crate::schema::INTEGER_MAX;
use crate::schema::INTEGER_MIN;
use crate::schema::InputSpec;
use crate::schema::OptInputData;
use crate::schema::OptionalInputSpec;
use crate::schema::REAL_MAX;
use crate::schema::REAL_MIN;

/// Indentation of emitted validation statements.
const IND: &str = "   ";

/// Renders the parameter-validation block of a function for one dialect.
///
/// For every optional input: a caller passing the dialect's "use default"
/// sentinel gets the schema default substituted; any other value must fall
/// inside `[min, max]` for range kinds or inside the numeric envelope of
/// the enumerated values for list kinds. The list check is an envelope
/// check only; exact membership is not verified.
#[derive(Debug, Clone, Copy)]
pub struct ValidationEmitter<'a> {
	schema: &'a FunctionSchema,
	dialect: Dialect,
}

impl<'a> ValidationEmitter<'a> {
	pub fn new(schema: &'a FunctionSchema, dialect: Dialect) -> Self {
		Self { schema, dialect }
	}

	/// Emit the full validation block. In lookback mode only the optional
	/// inputs are checked and violations return the lightweight `-1`
	/// sentinel instead of a bad-parameter code.
	pub fn emit(&self, lookback: bool) -> SiggenResult<String> {
		let mut out = String::new();
		if !lookback {
			self.emit_pointer_checks(&mut out);
		}
		for opt_input in &self.schema.opt_inputs {
			self.emit_opt_input_check(&mut out, opt_input, lookback);
		}
		if !lookback {
			self.emit_output_checks(&mut out);
		}
		Ok(out)
	}

	/// Presence checks for price-bundle components and plain array inputs.
	/// Compiled out entirely for dialects whose call boundary already
	/// guarantees non-null arguments.
	fn emit_pointer_checks(&self, out: &mut String) {
		let profile = self.dialect.profile();
		if !profile.checks_pointers {
			return;
		}
		for input in &self.schema.inputs {
			match input {
				InputSpec::Price { components, .. } => {
					let _ = writeln!(out, "{IND}/* Verify required price component. */");
					let names: Vec<String> = components
						.ordered()
						.iter()
						.map(|field| format!("!{}", field.param_name()))
						.collect();
					let _ = writeln!(out, "{IND}if({})", names.join("||"));
					let _ = writeln!(out, "{IND}   return {};", profile.bad_param);
					out.push('\n');
				}
				InputSpec::RealArray { param_name } | InputSpec::IntegerArray { param_name } => {
					let _ = writeln!(
						out,
						"{IND}if( !{param_name} ) return {};",
						profile.bad_param
					);
				}
			}
		}
	}

	fn emit_output_checks(&self, out: &mut String) {
		let profile = self.dialect.profile();
		if !profile.checks_pointers {
			return;
		}
		for output in &self.schema.outputs {
			let _ = writeln!(out, "{IND}if( !{} )", output.param_name);
			let _ = writeln!(out, "{IND}   return {};", profile.bad_param);
			out.push('\n');
		}
	}

	fn emit_opt_input_check(&self, out: &mut String, opt_input: &OptionalInputSpec, lookback: bool) {
		let profile = self.dialect.profile();
		let name = &opt_input.param_name;
		let violation = if lookback {
			format!("{IND}   return -1;")
		} else {
			format!("{IND}   return {};", profile.bad_param)
		};

		match &opt_input.data {
			OptInputData::IntegerRange { min, max, default, .. } => {
				let lo = int_bound(*min, profile.int_min, true);
				let hi = int_bound(*max, profile.int_max, false);
				let _ = writeln!(out, "{IND}if( (int){name} == {} )", profile.int_default);
				let _ = writeln!(out, "{IND}   {name} = {default};");
				let _ = writeln!(
					out,
					"{IND}else if( ((int){name} < {lo}) || ((int){name} > {hi}) )"
				);
				let _ = writeln!(out, "{violation}");
				out.push('\n');
			}
			OptInputData::IntegerList { default, is_enum_type, .. } => {
				if *is_enum_type && !profile.enum_is_int_backed {
					// A true enum type cannot hold an out-of-range value.
					return;
				}
				let (lo, hi) = opt_input.data.envelope();
				let cast = match profile.enum_render {
					EnumRender::Named(enum_name) if *is_enum_type => format!("({enum_name})"),
					_ => String::new(),
				};
				let _ = writeln!(out, "{IND}/* min/max are checked for {name}. */");
				let _ = writeln!(out, "{IND}if( (int){name} == {} )", profile.int_default);
				let _ = writeln!(out, "{IND}   {name} = {cast}{default};");
				let _ = writeln!(
					out,
					"{IND}else if( ((int){name} < {}) || ((int){name} > {}) )",
					lo as i64, hi as i64
				);
				let _ = writeln!(out, "{violation}");
				out.push('\n');
			}
			OptInputData::RealRange { min, max, default, .. } => {
				let lo = real_bound(*min, profile.real_min, true);
				let hi = real_bound(*max, profile.real_max, false);
				let _ = writeln!(out, "{IND}if( {name} == {} )", profile.real_default);
				let _ = writeln!(out, "{IND}   {name} = {};", real_literal(*default));
				let _ = writeln!(out, "{IND}else if( ({name} < {lo}) || ({name} > {hi}) )");
				let _ = writeln!(out, "{violation}");
				out.push('\n');
			}
			OptInputData::RealList { default, .. } => {
				let (lo, hi) = opt_input.data.envelope();
				let _ = writeln!(out, "{IND}/* min/max are checked for {name}. */");
				let _ = writeln!(out, "{IND}if( {name} == {} )", profile.real_default);
				let _ = writeln!(out, "{IND}   {name} = {};", real_literal(*default));
				let _ = writeln!(
					out,
					"{IND}else if( ({name} < {}) || ({name} > {}) )",
					real_literal(lo),
					real_literal(hi)
				);
				let _ = writeln!(out, "{violation}");
				out.push('\n');
			}
		}
	}
}

/// Render an integer range bound, substituting the dialect's named constant
/// for the symbolic extremes.
fn int_bound(value: i64, named: &str, is_min: bool) -> String {
	let symbolic = if is_min {
		value <= INTEGER_MIN
	} else {
		value >= INTEGER_MAX
	};
	if symbolic {
		named.to_string()
	} else {
		value.to_string()
	}
}

/// Render a real range bound, substituting the dialect's named constant for
/// the symbolic extremes.
fn real_bound(value: f64, named: &str, is_min: bool) -> String {
	let symbolic = if is_min {
		value <= REAL_MIN
	} else {
		value >= REAL_MAX
	};
	if symbolic {
		named.to_string()
	} else {
		real_literal(value)
	}
}

/// A real constant spelled so every C-family dialect parses it as a
/// floating literal. Deterministic: the same value always renders the same.
pub fn real_literal(value: f64) -> String {
	if value == value.trunc() && value.abs() < 1.0e15 {
		format!("{value:.1}")
	} else {
		format!("{value}")
	}
}
