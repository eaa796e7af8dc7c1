use crate::schema::FunctionFlags;
use crate::schema::FunctionSchema;
use crate::schema::INTEGER_MAX;
use crate::schema::INTEGER_MIN;
use crate::schema::InputSpec;
use crate::schema::IntegerListEntry;
use crate::schema::OptInputData;
use crate::schema::OptInputFlags;
use crate::schema::OptionalInputSpec;
use crate::schema::OutputFlags;
use crate::schema::OutputKind;
use crate::schema::OutputSpec;
use crate::schema::PriceComponents;

fn integer_range(param_name: &str, min: i64, max: i64, default: i64) -> OptionalInputSpec {
	OptionalInputSpec {
		param_name: param_name.to_string(),
		display_name: "Time Period".to_string(),
		hint: "Number of period".to_string(),
		flags: OptInputFlags::default(),
		data: OptInputData::IntegerRange {
			min,
			max,
			default,
			suggested_start: min,
			suggested_end: max.min(200),
			suggested_increment: 1,
		},
	}
}

fn real_output(param_name: &str) -> OutputSpec {
	OutputSpec {
		param_name: param_name.to_string(),
		kind: OutputKind::RealArray,
		flags: OutputFlags {
			line: true,
			..OutputFlags::default()
		},
	}
}

/// A price-bundle function with one optional period: high/low/close in,
/// one real series out.
pub fn scenario_a_schema() -> FunctionSchema {
	FunctionSchema {
		name: "FOO".to_string(),
		camel_case_name: "Foo".to_string(),
		group: "Overlap Studies".to_string(),
		hint: "Sample Indicator".to_string(),
		flags: FunctionFlags::default(),
		inputs: vec![InputSpec::Price {
			param_name: "inPriceHLC".to_string(),
			components: PriceComponents {
				high: true,
				low: true,
				close: true,
				..PriceComponents::default()
			},
		}],
		opt_inputs: vec![integer_range("optInTimePeriod", 2, 100_000, 30)],
		outputs: vec![real_output("outReal")],
	}
}

/// A plain one-in one-out function without optional inputs.
pub fn no_opt_schema() -> FunctionSchema {
	FunctionSchema {
		name: "COS".to_string(),
		camel_case_name: "Cos".to_string(),
		group: "Math Transform".to_string(),
		hint: "Vector Trigonometric Cos".to_string(),
		flags: FunctionFlags::default(),
		inputs: vec![InputSpec::RealArray {
			param_name: "inReal".to_string(),
		}],
		opt_inputs: vec![],
		outputs: vec![real_output("outReal")],
	}
}

/// A function carrying the enumeration-typed moving-average-method list
/// next to a plain integer period.
pub fn ma_type_schema() -> FunctionSchema {
	let entries = ["Sma", "Ema", "Wma", "Dema", "Tema", "Trima", "Kama", "Mama", "T3"]
		.iter()
		.enumerate()
		.map(|(value, label)| {
			IntegerListEntry {
				value: value as i64,
				label: (*label).to_string(),
			}
		})
		.collect();
	FunctionSchema {
		name: "MA".to_string(),
		camel_case_name: "MovingAverage".to_string(),
		group: "Overlap Studies".to_string(),
		hint: "Moving average".to_string(),
		flags: FunctionFlags::default(),
		inputs: vec![InputSpec::RealArray {
			param_name: "inReal".to_string(),
		}],
		opt_inputs: vec![
			integer_range("optInTimePeriod", 1, 100_000, 30),
			OptionalInputSpec {
				param_name: "optInMAType".to_string(),
				display_name: "MA Type".to_string(),
				hint: "Type of Moving Average".to_string(),
				flags: OptInputFlags::default(),
				data: OptInputData::IntegerList {
					entries,
					default: 0,
					is_enum_type: true,
				},
			},
		],
		outputs: vec![real_output("outReal")],
	}
}

/// A function with a real-range optional input and several outputs.
pub fn multi_output_schema() -> FunctionSchema {
	FunctionSchema {
		name: "MACDFIX".to_string(),
		camel_case_name: "MacdFix".to_string(),
		group: "Momentum Indicators".to_string(),
		hint: "Moving Average Convergence/Divergence Fix".to_string(),
		flags: FunctionFlags::default(),
		inputs: vec![InputSpec::RealArray {
			param_name: "inReal".to_string(),
		}],
		opt_inputs: vec![OptionalInputSpec {
			param_name: "optInFastLimit".to_string(),
			display_name: "Fast Limit".to_string(),
			hint: String::new(),
			flags: OptInputFlags::default(),
			data: OptInputData::RealRange {
				min: 0.01,
				max: 0.99,
				precision: 2,
				default: 0.5,
				suggested_start: 0.21,
				suggested_end: 0.8,
				suggested_increment: 0.01,
			},
		}],
		outputs: vec![
			real_output("outMACD"),
			real_output("outMACDSignal"),
			real_output("outMACDHist"),
		],
	}
}

/// A function whose optional range spans the full symbolic extremes.
pub fn symbolic_range_schema() -> FunctionSchema {
	let mut schema = no_opt_schema();
	schema.name = "SYM".to_string();
	schema.camel_case_name = "Sym".to_string();
	schema
		.opt_inputs
		.push(integer_range("optInShift", INTEGER_MIN, INTEGER_MAX, 14));
	schema
}

/// The stock scaffolding a brand-new function file starts from.
pub fn stock_function_template() -> &'static str {
	"/* Stock scaffolding for a new function. */\n\n\
	 /**** START GENCODE SECTION 1 - DO NOT DELETE THIS LINE ****/\n\
	 %%%GENCODE%%%\n\
	 /**** END GENCODE SECTION 1 - DO NOT DELETE THIS LINE ****/\n\n\
	 /**** START GENCODE SECTION 2 - DO NOT DELETE THIS LINE ****/\n\
	 %%%GENCODE%%%\n\
	 /**** END GENCODE SECTION 2 - DO NOT DELETE THIS LINE ****/\n\
	 \x20\x20\x20/* insert lookback code here. */\n\
	 \x20\x20\x20return 0;\n\
	 }\n\n\
	 /**** START GENCODE SECTION 3 - DO NOT DELETE THIS LINE ****/\n\
	 %%%GENCODE%%%\n\
	 /**** END GENCODE SECTION 3 - DO NOT DELETE THIS LINE ****/\n\
	 \x20\x20\x20/* insert local variable here */\n\n\
	 \x20\x20\x20/* insert algorithm here */\n\n\
	 \x20\x20\x20*outBegIdx = startIdx;\n\
	 \x20\x20\x20*outNBElement = 0;\n\n\
	 \x20\x20\x20return TA_SUCCESS;\n\
	 }\n\n\
	 /**** START GENCODE SECTION 4 - DO NOT DELETE THIS LINE ****/\n\
	 %%%GENCODE%%%\n\
	 /**** END GENCODE SECTION 4 - DO NOT DELETE THIS LINE ****/\n"
}

/// A minimal single-region template: hand header, marker, hand footer.
pub fn single_region_template() -> &'static str {
	"/* hand-maintained header */\n%%%GENCODE%%%\n/* hand-maintained footer */\n"
}

/// A two-region template in the shape of the Java core class.
pub fn two_region_template() -> &'static str {
	"public class Core {\n\
	 %%%GENCODE%%%\n\
	 \x20\x20\x20/* hand code between the regions */\n\
	 %%%GENCODE%%%\n\
	 }\n"
}

/// A TOML function table with two functions in two groups.
pub fn sample_registry_toml() -> &'static str {
	r##"
[[function]]
name = "FOO"
camel_case_name = "Foo"
group = "Overlap Studies"
hint = "Sample Indicator"

[[function.inputs]]
kind = "price"
param_name = "inPriceHLC"
components = { high = true, low = true, close = true }

[[function.opt_inputs]]
param_name = "optInTimePeriod"
display_name = "Time Period"
hint = "Number of period"
kind = "integer_range"
min = 2
max = 100000
default = 30

[[function.outputs]]
param_name = "outReal"
kind = "real_array"
flags = { line = true }

[[function]]
name = "COS"
camel_case_name = "Cos"
group = "Math Transform"
hint = "Vector Trigonometric Cos"

[[function.inputs]]
kind = "real_array"
param_name = "inReal"

[[function.outputs]]
param_name = "outReal"
kind = "real_array"
"##
}
