use std::fs;
use std::path::Path;

use assert_cmd::Command;

pub fn siggen_cmd() -> Command {
	let mut cmd = Command::cargo_bin("siggen").expect("siggen binary");
	cmd.env("NO_COLOR", "1");
	cmd
}

const FUNC_C_TEMPLATE: &str = "/* Stock scaffolding for a new function. */\n\n\
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
	\x20\x20\x20/* insert algorithm here */\n\n\
	\x20\x20\x20*outBegIdx = startIdx;\n\
	\x20\x20\x20*outNBElement = 0;\n\n\
	\x20\x20\x20return TA_SUCCESS;\n\
	}\n\n\
	/**** START GENCODE SECTION 4 - DO NOT DELETE THIS LINE ****/\n\
	%%%GENCODE%%%\n\
	/**** END GENCODE SECTION 4 - DO NOT DELETE THIS LINE ****/\n";

const FUNCTIONS_TOML: &str = r##"
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
"##;

/// Lay out a minimal project: templates plus a two-function registry.
pub fn write_project(root: &Path) -> std::io::Result<()> {
	let templates = root.join("templates");
	fs::create_dir_all(&templates)?;
	fs::write(
		templates.join("func.h.template"),
		"/* func.h header */\n%%%GENCODE%%%\n/* func.h footer */\n",
	)?;
	fs::write(templates.join("func.c.template"), FUNC_C_TEMPLATE)?;
	fs::write(
		templates.join("frame.h.template"),
		"/* frame.h */\n%%%GENCODE%%%\n",
	)?;
	fs::write(
		templates.join("frame.c.template"),
		"/* frame.c */\n%%%GENCODE%%%\n",
	)?;
	fs::write(
		templates.join("Core.java.template"),
		"public class Core {\n%%%GENCODE%%%\n   /* hand code between the regions */\n%%%GENCODE%%%\n}\n",
	)?;
	fs::write(
		templates.join("core.h.template"),
		"/* core.h */\n%%%GENCODE%%%\n",
	)?;
	fs::write(root.join("functions.toml"), FUNCTIONS_TOML)?;
	Ok(())
}
