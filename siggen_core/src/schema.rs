use serde::Deserialize;

use crate::SiggenError;
use crate::SiggenResult;

/// Smallest integer an integer-range parameter may declare. Rendered as the
/// named constant `TA_INTEGER_MIN`, never as a literal.
pub const INTEGER_MIN: i64 = (i32::MIN + 1) as i64;

/// Largest integer an integer-range parameter may declare. Rendered as
/// `TA_INTEGER_MAX`.
pub const INTEGER_MAX: i64 = i32::MAX as i64;

/// Smallest real an optional real-range parameter may declare. Rendered as
/// `TA_REAL_MIN`.
pub const REAL_MIN: f64 = -3.0e37;

/// Largest real an optional real-range parameter may declare. Rendered as
/// `TA_REAL_MAX`.
pub const REAL_MAX: f64 = 3.0e37;

/// Capability flags attached to a whole function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FunctionFlags {
	/// Output scales with the input price (overlays the price chart).
	pub overlap: bool,
	/// Output is a volume-like quantity.
	pub volume: bool,
	/// Function is a candlestick pattern recognizer.
	pub candlestick: bool,
	/// Function needs a warm-up period before its output stabilizes.
	pub unstable_period: bool,
}

/// Which components of a price bundle a function consumes. At least one
/// component must be flagged; [`FunctionSchema::validate`] enforces this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PriceComponents {
	pub open: bool,
	pub high: bool,
	pub low: bool,
	pub close: bool,
	pub volume: bool,
	pub open_interest: bool,
	pub timestamp: bool,
}

impl PriceComponents {
	/// Canonical emission order for the flagged components. Open always
	/// precedes high, high precedes low, and so on, regardless of how the
	/// schema spelled the flags.
	pub fn ordered(&self) -> Vec<PriceField> {
		let mut fields = Vec::new();
		if self.open {
			fields.push(PriceField::Open);
		}
		if self.high {
			fields.push(PriceField::High);
		}
		if self.low {
			fields.push(PriceField::Low);
		}
		if self.close {
			fields.push(PriceField::Close);
		}
		if self.volume {
			fields.push(PriceField::Volume);
		}
		if self.open_interest {
			fields.push(PriceField::OpenInterest);
		}
		if self.timestamp {
			fields.push(PriceField::Timestamp);
		}
		fields
	}

	pub fn count(&self) -> usize {
		self.ordered().len()
	}

	pub fn is_empty(&self) -> bool {
		self.count() == 0
	}
}

/// One named time series inside a price bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
	Open,
	High,
	Low,
	Close,
	Volume,
	OpenInterest,
	Timestamp,
}

impl PriceField {
	/// Parameter name used in emitted signatures (`inOpen`, `inHigh`, …).
	pub fn param_name(&self) -> &'static str {
		match self {
			Self::Open => "inOpen",
			Self::High => "inHigh",
			Self::Low => "inLow",
			Self::Close => "inClose",
			Self::Volume => "inVolume",
			Self::OpenInterest => "inOpenInterest",
			Self::Timestamp => "inTimestamp",
		}
	}

	/// Field name inside the frame parameter holder (`open`, `high`, …).
	pub fn holder_field(&self) -> &'static str {
		match self {
			Self::Open => "open",
			Self::High => "high",
			Self::Low => "low",
			Self::Close => "close",
			Self::Volume => "volume",
			Self::OpenInterest => "openInterest",
			Self::Timestamp => "timestamp",
		}
	}
}

/// A required input of a function.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputSpec {
	/// A fixed set of named time-series components; only the flagged subset
	/// becomes parameters.
	Price {
		param_name: String,
		components: PriceComponents,
	},
	RealArray { param_name: String },
	IntegerArray { param_name: String },
}

impl InputSpec {
	pub fn param_name(&self) -> &str {
		match self {
			Self::Price { param_name, .. }
			| Self::RealArray { param_name }
			| Self::IntegerArray { param_name } => param_name,
		}
	}
}

/// Hint flags controlling how a UI should present an optional input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OptInputFlags {
	pub percent: bool,
	pub degree: bool,
	pub currency: bool,
	pub advanced: bool,
}

/// One `(value, label)` pair of an enumerated optional input.
#[derive(Debug, Clone, Deserialize)]
pub struct IntegerListEntry {
	pub value: i64,
	pub label: String,
}

/// One `(value, label)` pair of an enumerated real optional input.
#[derive(Debug, Clone, Deserialize)]
pub struct RealListEntry {
	pub value: f64,
	pub label: String,
}

/// The kind-specific payload of an optional input.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptInputData {
	RealRange {
		min: f64,
		max: f64,
		/// Number of digits shown after the decimal point in range comments.
		#[serde(default = "default_precision")]
		precision: usize,
		default: f64,
		#[serde(default)]
		suggested_start: f64,
		#[serde(default)]
		suggested_end: f64,
		#[serde(default)]
		suggested_increment: f64,
	},
	IntegerRange {
		min: i64,
		max: i64,
		default: i64,
		#[serde(default)]
		suggested_start: i64,
		#[serde(default)]
		suggested_end: i64,
		#[serde(default)]
		suggested_increment: i64,
	},
	IntegerList {
		entries: Vec<IntegerListEntry>,
		default: i64,
		/// Marks the shared moving-average-method list. Parameters carrying
		/// this flag render as the dialect's named enumeration type.
		#[serde(default)]
		is_enum_type: bool,
	},
	RealList {
		entries: Vec<RealListEntry>,
		default: f64,
	},
}

fn default_precision() -> usize {
	2
}

impl OptInputData {
	/// The numeric envelope of the allowed values: `[min, max]` for ranges,
	/// the min and max of the enumerated values for lists. List validation
	/// deliberately checks only this envelope, not exact membership.
	pub fn envelope(&self) -> (f64, f64) {
		match self {
			Self::RealRange { min, max, .. } => (*min, *max),
			Self::IntegerRange { min, max, .. } => (*min as f64, *max as f64),
			Self::IntegerList { entries, .. } => {
				let mut lo = i64::MAX;
				let mut hi = i64::MIN;
				for entry in entries {
					lo = lo.min(entry.value);
					hi = hi.max(entry.value);
				}
				(lo as f64, hi as f64)
			}
			Self::RealList { entries, .. } => {
				let mut lo = f64::INFINITY;
				let mut hi = f64::NEG_INFINITY;
				for entry in entries {
					lo = lo.min(entry.value);
					hi = hi.max(entry.value);
				}
				(lo, hi)
			}
		}
	}

	/// True for integer-valued kinds (integer range or integer list).
	pub fn is_integer(&self) -> bool {
		matches!(self, Self::IntegerRange { .. } | Self::IntegerList { .. })
	}

	/// True when this is the distinguished enumeration-typed list.
	pub fn is_enum_type(&self) -> bool {
		matches!(self, Self::IntegerList { is_enum_type: true, .. })
	}

	fn kind_name(&self) -> &'static str {
		match self {
			Self::RealRange { .. } => "real_range",
			Self::IntegerRange { .. } => "integer_range",
			Self::IntegerList { .. } => "integer_list",
			Self::RealList { .. } => "real_list",
		}
	}
}

/// An optional input of a function. Callers may pass the dialect's
/// "use default" sentinel instead of a concrete value.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionalInputSpec {
	pub param_name: String,
	pub display_name: String,
	#[serde(default)]
	pub hint: String,
	#[serde(default)]
	pub flags: OptInputFlags,
	#[serde(flatten)]
	pub data: OptInputData,
}

/// The element kind of an output array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
	RealArray,
	IntegerArray,
}

/// Semantic flags describing how an output series should be drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputFlags {
	pub line: bool,
	pub histogram: bool,
	pub pattern: bool,
	pub positive: bool,
	pub negative: bool,
	pub zero: bool,
	pub limit: bool,
}

/// An output of a function.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSpec {
	pub param_name: String,
	pub kind: OutputKind,
	#[serde(default)]
	pub flags: OutputFlags,
}

/// Immutable, language-neutral description of one function's calling
/// interface. Constructed once per run from the registry and never mutated;
/// the generation session iterates the registry at most twice.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionSchema {
	/// Uppercase short name (`"SMA"`). Used verbatim in C identifiers.
	pub name: String,
	/// Mixed-case display name (`"Sma"`, `"MovingAverage"`). Dialects with a
	/// casing rule derive their identifiers from this.
	pub camel_case_name: String,
	pub group: String,
	#[serde(default)]
	pub hint: String,
	#[serde(default)]
	pub flags: FunctionFlags,
	#[serde(default)]
	pub inputs: Vec<InputSpec>,
	#[serde(default)]
	pub opt_inputs: Vec<OptionalInputSpec>,
	#[serde(default)]
	pub outputs: Vec<OutputSpec>,
}

impl FunctionSchema {
	/// Check the structural invariants the emitters rely on: every price
	/// bundle flags at least one component and enumerated lists are
	/// non-empty.
	pub fn validate(&self) -> SiggenResult<()> {
		for (index, input) in self.inputs.iter().enumerate() {
			if let InputSpec::Price { components, .. } = input {
				if components.is_empty() {
					return Err(SiggenError::Schema {
						function: self.name.clone(),
						param_index: index,
						kind: "price".to_string(),
						detail: "price bundle flags no component".to_string(),
					});
				}
			}
		}
		for (index, opt_input) in self.opt_inputs.iter().enumerate() {
			let empty = match &opt_input.data {
				OptInputData::IntegerList { entries, .. } => entries.is_empty(),
				OptInputData::RealList { entries, .. } => entries.is_empty(),
				OptInputData::RealRange { .. } | OptInputData::IntegerRange { .. } => false,
			};
			if empty {
				return Err(SiggenError::Schema {
					function: self.name.clone(),
					param_index: index,
					kind: opt_input.data.kind_name().to_string(),
					detail: "enumerated list has no entries".to_string(),
				});
			}
		}
		Ok(())
	}
}
