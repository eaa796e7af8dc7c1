use std::fmt;

use crate::schema::FunctionSchema;

/// How a dialect derives its function identifiers from the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentCasing {
	/// Use the uppercase short name verbatim (`TA_SMA`).
	UpperName,
	/// Use the mixed-case name with its first letter lowered (`sma`,
	/// `movingAverage`).
	LowerCamel,
	/// Use the mixed-case name verbatim (`Sma`, `MovingAverage`).
	Pascal,
}

/// How a dialect renders the distinguished enumeration-typed optional input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumRender {
	/// Render as this named enumeration type.
	Named(&'static str),
	/// The dialect forbids foreign enum imports; the parameter is omitted
	/// from its signatures entirely.
	Unsupported,
}

/// Static syntax and type-mapping rules for one target dialect. Defined
/// once as a `const` table, never derived from schema data.
#[derive(Debug, Clone, Copy)]
pub struct DialectProfile {
	/// Element type of real input arrays (`const double`, `double`, …).
	pub real_array_in: &'static str,
	/// Element type of integer input arrays.
	pub int_array_in: &'static str,
	/// Element type of real output arrays.
	pub real_array_out: &'static str,
	/// Element type of integer output arrays.
	pub int_array_out: &'static str,
	/// Scalar integer type for `startIdx`/`endIdx` and integer options.
	pub scalar_int: &'static str,
	/// Scalar real type for real options.
	pub scalar_real: &'static str,
	/// Type of the `outBegIdx`/`outNBElement` out-parameters.
	pub out_int_param: &'static str,
	/// Whether out-parameters are passed by pointer (`int *outBegIdx`).
	pub out_int_by_pointer: bool,
	/// Token appended after array parameter names (`[]` or empty).
	pub array_suffix: &'static str,
	/// Return type of the main entry point.
	pub ret_type: &'static str,
	/// Prefix glued in front of the derived function identifier.
	pub func_prefix: &'static str,
	/// Declaration keywords emitted before the return type.
	pub visibility: &'static str,
	pub casing: IdentCasing,
	pub enum_render: EnumRender,
	/// False when the dialect's call boundary already guarantees non-null
	/// arguments, in which case pointer checks are compiled out.
	pub checks_pointers: bool,
	/// True when the named enumeration is an integer-backed typedef that
	/// still needs range validation (and a cast when defaulted).
	pub enum_is_int_backed: bool,
	/// True when the emitted artifact must be run through the external
	/// preprocessor before it is final.
	pub needs_postprocess: bool,
	/// Expression returned on a failed parameter check.
	pub bad_param: &'static str,
	/// Named "use default" sentinel for integer options.
	pub int_default: &'static str,
	/// Named "use default" sentinel for real options.
	pub real_default: &'static str,
	/// Named constants for symbolic range extremes.
	pub int_min: &'static str,
	pub int_max: &'static str,
	pub real_min: &'static str,
	pub real_max: &'static str,
}

const C_PROFILE: DialectProfile = DialectProfile {
	real_array_in: "const double",
	int_array_in: "const int",
	real_array_out: "double",
	int_array_out: "int",
	scalar_int: "int",
	scalar_real: "double",
	out_int_param: "int",
	out_int_by_pointer: true,
	array_suffix: "[]",
	ret_type: "TA_RetCode",
	func_prefix: "TA_",
	visibility: "",
	casing: IdentCasing::UpperName,
	enum_render: EnumRender::Named("TA_MAType"),
	checks_pointers: true,
	enum_is_int_backed: true,
	needs_postprocess: false,
	bad_param: "TA_BAD_PARAM",
	int_default: "TA_INTEGER_DEFAULT",
	real_default: "TA_REAL_DEFAULT",
	int_min: "TA_INTEGER_MIN",
	int_max: "TA_INTEGER_MAX",
	real_min: "TA_REAL_MIN",
	real_max: "TA_REAL_MAX",
};

const C_SINGLE_PROFILE: DialectProfile = DialectProfile {
	real_array_in: "const float",
	func_prefix: "TA_S_",
	..C_PROFILE
};

const JAVA_PROFILE: DialectProfile = DialectProfile {
	real_array_in: "double",
	int_array_in: "int",
	real_array_out: "double",
	int_array_out: "int",
	scalar_int: "int",
	scalar_real: "double",
	out_int_param: "MInteger",
	out_int_by_pointer: false,
	array_suffix: "[]",
	ret_type: "RetCode",
	func_prefix: "",
	visibility: "public ",
	casing: IdentCasing::LowerCamel,
	enum_render: EnumRender::Named("MAType"),
	checks_pointers: false,
	enum_is_int_backed: false,
	needs_postprocess: false,
	bad_param: "RetCode.BadParam",
	int_default: "Integer.MIN_VALUE",
	real_default: "(-4e+37)",
	int_min: "Integer.MIN_VALUE + 1",
	int_max: "Integer.MAX_VALUE",
	real_min: "(-3e+37)",
	real_max: "(3e+37)",
};

const DOTNET_PROFILE: DialectProfile = DialectProfile {
	real_array_in: "cli::array<double>^",
	int_array_in: "cli::array<int>^",
	real_array_out: "cli::array<double>^",
	int_array_out: "cli::array<int>^",
	scalar_int: "int",
	scalar_real: "double",
	out_int_param: "[Out] int%",
	out_int_by_pointer: false,
	array_suffix: "",
	ret_type: "enum class RetCode",
	func_prefix: "",
	visibility: "static ",
	casing: IdentCasing::Pascal,
	enum_render: EnumRender::Unsupported,
	checks_pointers: false,
	enum_is_int_backed: false,
	needs_postprocess: true,
	bad_param: "RetCode::BadParam",
	int_default: "Int32::MinValue",
	real_default: "Double::MinValue",
	int_min: "Int32::MinValue + 1",
	int_max: "Int32::MaxValue",
	real_min: "(-3e+37)",
	real_max: "(3e+37)",
};

/// The closed set of target dialects. Each variant carries its own profile
/// and its own emission path, so illegal combinations of per-target flags
/// are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
	/// Plain C, double-precision inputs.
	C,
	/// Plain C, single-precision input variant (`TA_S_` entry points).
	CSingle,
	Java,
	/// Managed C++ interface, post-processed through the external
	/// preprocessor.
	DotNet,
}

impl Dialect {
	pub fn profile(&self) -> &'static DialectProfile {
		match self {
			Self::C => &C_PROFILE,
			Self::CSingle => &C_SINGLE_PROFILE,
			Self::Java => &JAVA_PROFILE,
			Self::DotNet => &DOTNET_PROFILE,
		}
	}

	/// Full function identifier for this dialect, prefix included.
	pub fn func_name(&self, schema: &FunctionSchema) -> String {
		let profile = self.profile();
		let base = match profile.casing {
			IdentCasing::UpperName => schema.name.clone(),
			IdentCasing::Pascal => schema.camel_case_name.clone(),
			IdentCasing::LowerCamel => {
				let mut chars = schema.camel_case_name.chars();
				match chars.next() {
					Some(first) => first.to_lowercase().chain(chars).collect(),
					None => String::new(),
				}
			}
		};
		format!("{}{}", profile.func_prefix, base)
	}

	/// Identifier of the lookback entry point for this dialect.
	pub fn lookback_name(&self, schema: &FunctionSchema) -> String {
		match self.profile().casing {
			IdentCasing::UpperName => format!("{}_Lookback", self.func_name(schema)),
			IdentCasing::LowerCamel | IdentCasing::Pascal => {
				format!("{}Lookback", self.func_name(schema))
			}
		}
	}
}

impl fmt::Display for Dialect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::C => "c",
			Self::CSingle => "c-single",
			Self::Java => "java",
			Self::DotNet => "dotnet",
		};
		f.write_str(name)
	}
}
