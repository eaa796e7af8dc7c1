use crate::SiggenError;
use crate::SiggenResult;

/// Delimiters of the hand-written main algorithm body: everything between
/// the end of generated section 3 and the start of generated section 4.
const BODY_START: &str = "/**** END GENCODE SECTION 3";
const BODY_END: &str = "/**** START GENCODE SECTION 4";

/// Delimiters of the hand-written lookback body.
const LOOKBACK_START: &str = "/**** END GENCODE SECTION 2";
const LOOKBACK_END: &str = "/**** START GENCODE SECTION 3";

/// Prefix stamped on every extracted line so readers know the text is a
/// machine-made copy of the hand-written body.
pub const GENERATED_PREFIX: &str = "/* Generated */ ";

const BEGIN_PROPRIETARY: &str = "* Begin Proprietary *";
const END_PROPRIETARY: &str = "* End Proprietary *";

/// Pull the main algorithm body out of a generated function file and
/// normalize it for re-emission in another variant of the function.
///
/// Line and block comments are stripped, lines left blank by the stripping
/// are dropped, and every surviving line gets the [`GENERATED_PREFIX`].
/// Proprietary section markers are the one exception: their lines are
/// replaced with a canonical marker so the section boundaries survive the
/// copy.
pub fn extract_logic(source: &str, origin: &str) -> SiggenResult<String> {
	extract_between(source, origin, BODY_START, BODY_END)
}

/// Same normalization for the hand-written lookback body.
pub fn extract_lookback_logic(source: &str, origin: &str) -> SiggenResult<String> {
	extract_between(source, origin, LOOKBACK_START, LOOKBACK_END)
}

fn extract_between(source: &str, origin: &str, start: &str, end: &str) -> SiggenResult<String> {
	let mut out = String::new();
	let mut lines = source.lines();
	let mut found_start = false;

	for line in lines.by_ref() {
		if line.trim_start().starts_with(start) {
			found_start = true;
			break;
		}
	}
	if !found_start {
		return Err(SiggenError::MissingLogic {
			file: origin.to_string(),
		});
	}

	let mut stripper = CommentStripper::default();
	for line in lines {
		if line.trim_start().starts_with(end) {
			return Ok(out);
		}
		if line.contains(BEGIN_PROPRIETARY) {
			out.push_str(GENERATED_PREFIX);
			out.push_str("/* Begin Proprietary */\n");
			continue;
		}
		if line.contains(END_PROPRIETARY) {
			out.push_str(GENERATED_PREFIX);
			out.push_str("/* End Proprietary */\n");
			continue;
		}
		let stripped = stripper.strip_line(line);
		if stripped.chars().any(|c| !c.is_whitespace()) {
			out.push_str(GENERATED_PREFIX);
			out.push_str(stripped.trim_end());
			out.push('\n');
		}
	}

	Err(SiggenError::MissingLogic {
		file: origin.to_string(),
	})
}

/// Character-level C comment remover. Block comment state persists across
/// lines; a `*` at the end of one line and a `/` at the start of the next
/// do not terminate a block comment.
#[derive(Debug, Default)]
struct CommentStripper {
	in_block_comment: bool,
}

impl CommentStripper {
	fn strip_line(&mut self, line: &str) -> String {
		let mut out = String::with_capacity(line.len());
		let mut pending_slash = false;
		let mut prev_star = false;

		for c in line.chars() {
			if self.in_block_comment {
				if prev_star && c == '/' {
					self.in_block_comment = false;
					prev_star = false;
				} else {
					prev_star = c == '*';
				}
			} else if pending_slash {
				pending_slash = false;
				match c {
					'*' => {
						self.in_block_comment = true;
						prev_star = false;
					}
					// Rest of the line is a line comment.
					'/' => return out,
					_ => {
						out.push('/');
						out.push(c);
					}
				}
			} else if c == '/' {
				pending_slash = true;
			} else {
				out.push(c);
			}
		}
		// A slash at the end of a line is plain code, not a comment opener.
		if pending_slash {
			out.push('/');
		}
		out
	}
}
