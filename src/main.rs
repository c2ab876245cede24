use std::fs::File;
use std::io::{self, BufReader};

use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use log::{info, LevelFilter};

use camera_registry::config::ConfigManager;
use camera_registry::report::Reporter;



fn main() -> anyhow::Result<()> {
	let matches = Command::new("camera-registry")
		.version(env!("CARGO_PKG_VERSION"))
		.about("In-memory registry of surveillance cameras and their footage.")
		.arg(
			Arg::new("config")
				.action(ArgAction::Append)	// Allow argument to be specified multiple times
				.short('c')
				.long("config")
				.help("TOML file with registry settings and seed cameras")
		)
		.arg(
			Arg::new("script")
				.short('s')
				.long("script")
				.help("File of registry commands, one per line (default: stdin)")
		)
		.arg(
			Arg::new("json")
				.long("json")
				.action(ArgAction::SetTrue)
				.help("Print outcomes and records as JSON lines")
		)
		.arg(
			Arg::new("verbose")
				.short('v')
				.long("verbose")
				.action(ArgAction::Count)
				.help("Increase log verbosity")
		)
		.get_matches();

	let level = match matches.get_count("verbose") {
		0 => LevelFilter::Info,
		1 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};
	// RUST_LOG still wins when set
	env_logger::Builder::new()
		.filter_level(level)
		.parse_default_env()
		.init();

	let mut config_manager = ConfigManager::new();
	let config_filename_matches = matches.get_many::<String>("config");
	match config_filename_matches {
		Some(filenames) => {
			config_manager.read_config(filenames.map(|v| v.as_str()).collect())?;
		},
		None => {
			// Use default file path
			config_manager.read_default_config_files()?;
		}
	};

	let (mut manager, seeded) = config_manager.build_manager();
	let json = matches.get_flag("json");
	let mut reporter = Reporter::new(io::stdout().lock(), json);
	for outcome in &seeded {
		reporter.outcome(outcome)?;
	}

	let summary = match matches.get_one::<String>("script") {
		Some(path) => {
			let file = File::open(path).with_context(|| format!("Failed to open script {}", path))?;
			reporter.run_script(&mut manager, BufReader::new(file))?
		},
		None => reporter.run_script(&mut manager, io::stdin().lock())?,
	};

	info!(
		"{} command(s) succeeded, {} refused, {} invalid; {} camera(s), {} footage record(s)",
		summary.succeeded,
		summary.refused,
		summary.invalid,
		manager.camera_count(),
		manager.footage_count()
	);

	anyhow::Ok(())
}
