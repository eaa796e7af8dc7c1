use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use siggen_cli::Commands;
use siggen_cli::SiggenCli;
use siggen_core::DialectToggles;
use siggen_core::GenSession;
use siggen_core::Registry;
use siggen_core::RunMode;
use siggen_core::RunSummary;
use siggen_core::SiggenConfig;
use siggen_core::TableRegistry;
use siggen_core::run_session;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = SiggenCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	// Warnings (skipped functions, failed tools) must reach the user even
	// without --verbose; --verbose additionally surfaces per-artifact debug
	// lines.
	let level = if args.verbose {
		tracing_subscriber::filter::LevelFilter::DEBUG
	} else {
		tracing_subscriber::filter::LevelFilter::WARN
	};
	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_ansi(use_color)
		.with_writer(std::io::stderr)
		.init();

	let result = match &args.command {
		Some(Commands::Generate { dry_run, dialect }) => run_generate(&args, *dry_run, dialect),
		Some(Commands::Check { diff }) => run_check(&args, *diff),
		Some(Commands::List) => run_list(&args),
		None => {
			eprintln!("No subcommand specified. Run `siggen --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<siggen_core::SiggenError>() {
			Ok(siggen_err) => {
				let report: miette::Report = (*siggen_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn resolve_root(args: &SiggenCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn print_skipped(summary: &RunSummary) {
	for skipped in &summary.skipped {
		eprintln!(
			"{} skipped `{skipped}`, see the warning above",
			colored!("warning:", yellow)
		);
	}
}

fn run_generate(
	args: &SiggenCli,
	dry_run: bool,
	dialects: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let mut config = SiggenConfig::discover(&root)?;
	if !dialects.is_empty() {
		config.dialects = DialectToggles {
			c: dialects.iter().any(|d| d == "c"),
			java: dialects.iter().any(|d| d == "java"),
			dotnet: dialects.iter().any(|d| d == "dotnet"),
		};
	}
	let registry = TableRegistry::from_path(&config.functions_path(&root))?;

	if dry_run {
		let summary = GenSession::new(&registry, &config, &root, RunMode::Check).run()?;
		print_skipped(&summary);
		if summary.is_clean() {
			println!("Dry run: everything is already up to date.");
			return Ok(());
		}
		println!("Dry run: would write {} artifact(s):", summary.stale.len());
		for stale in &summary.stale {
			println!("  {}", make_relative(&stale.path, &root));
		}
		return Ok(());
	}

	let summary = GenSession::new(&registry, &config, &root, RunMode::Generate).run()?;
	print_skipped(&summary);
	println!(
		"Generated {} artifact(s): {} created, {} updated, {} unchanged.",
		summary.created.len() + summary.updated.len() + summary.unchanged,
		summary.created.len(),
		summary.updated.len(),
		summary.unchanged
	);

	if args.verbose {
		for path in summary.created.iter().chain(&summary.updated) {
			println!("  {}", make_relative(path, &root));
		}
	}

	Ok(())
}

fn run_check(args: &SiggenCli, show_diff: bool) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let summary = run_session(&root, RunMode::Check)?;
	print_skipped(&summary);

	if summary.is_clean() {
		println!("Check passed: all generated artifacts are up to date.");
		return Ok(());
	}

	eprintln!("Check failed.");
	eprintln!("  out-of-date artifacts: {}", summary.stale.len());
	eprintln!();
	for stale in &summary.stale {
		eprintln!("  {}", make_relative(&stale.path, &root));
		if show_diff {
			let current = std::fs::read_to_string(&stale.path).unwrap_or_default();
			print_diff(&current, &stale.expected);
		}
	}
	eprintln!();
	eprintln!(
		"{} artifact(s) are out of date. Run `siggen generate` to fix.",
		summary.stale.len()
	);
	process::exit(1);
}

fn run_list(args: &SiggenCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = SiggenConfig::discover(&root)?;
	let registry = TableRegistry::from_path(&config.functions_path(&root))?;

	if registry.functions().is_empty() {
		println!("No functions found in the registry.");
		return Ok(());
	}

	for group in registry.groups() {
		println!("{}", colored!(format!("{group}:"), bold));
		for schema in registry.functions() {
			if schema.group == group {
				println!("  {:<12} {}", schema.name, schema.hint);
			}
		}
	}
	println!(
		"\n{} function(s) in {} group(s)",
		registry.functions().len(),
		registry.groups().len()
	);

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
