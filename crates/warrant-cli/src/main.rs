// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod logging;
mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use warrant_authz::{Engine, EngineConfig, UnknownRolePolicy};
use warrant_config::{UnknownRoles, WarrantConfig};

use scenario::{Outcome, Scenario, World};

/// Warrant - project authorization scenario runner
#[derive(Parser, Debug)]
#[command(name = "warrant", version)]
struct Args {
	/// Config file (defaults to /etc/warrant/warrant.toml)
	#[arg(long, global = true, env = "WARRANT_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Evaluate a scenario file and compare outcomes with expectations
	Check {
		/// Path to the scenario TOML file
		scenario: PathBuf,

		/// Output format
		#[arg(long, value_enum, default_value_t = Output::Text)]
		output: Output,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
	Text,
	Json,
}

fn main() -> ExitCode {
	let args = Args::parse();

	let config = match load_config(&args) {
		Ok(config) => config,
		Err(e) => {
			eprintln!("error: {e:#}");
			return ExitCode::from(2);
		}
	};
	logging::init(&config.logging);

	match run(&args, &config) {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(e) => {
			eprintln!("error: {e:#}");
			ExitCode::from(2)
		}
	}
}

fn load_config(args: &Args) -> Result<WarrantConfig> {
	let config = match &args.config {
		Some(path) => warrant_config::load_config_with_file(path)?,
		None => warrant_config::load_config()?,
	};
	Ok(config)
}

fn engine_config(config: &WarrantConfig) -> EngineConfig {
	EngineConfig {
		conceal_not_found: config.engine.conceal_not_found,
	}
}

fn unknown_role_policy(config: &WarrantConfig) -> UnknownRolePolicy {
	match config.engine.unknown_roles {
		UnknownRoles::Reject => UnknownRolePolicy::Reject,
		UnknownRoles::Ignore => UnknownRolePolicy::Ignore,
	}
}

/// Returns `Ok(false)` when any expectation failed.
fn run(args: &Args, config: &WarrantConfig) -> Result<bool> {
	match &args.command {
		Command::Check { scenario, output } => {
			let engine = Engine::new(engine_config(config));
			let parsed = Scenario::from_path(scenario)?;
			let world = World::build(&parsed, unknown_role_policy(config))
				.with_context(|| format!("failed to build scenario {}", scenario.display()))?;
			let outcomes = scenario::run(&parsed, &world, &engine)?;

			match output {
				Output::Text => print_text(&outcomes),
				Output::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
			}

			let failed = outcomes.iter().filter(|o| !o.passed()).count();
			if failed > 0 {
				warn!(failed, total = outcomes.len(), "scenario expectations failed");
			} else {
				info!(total = outcomes.len(), "all scenario expectations met");
			}
			Ok(failed == 0)
		}
	}
}

fn print_text(outcomes: &[Outcome]) {
	println!("Expected == value");
	for outcome in outcomes {
		let mark = if outcome.passed() { '✔' } else { '✗' };
		println!(
			"{mark} {:<5} == {:<5}  {} [{}]",
			outcome.expected, outcome.actual, outcome.description, outcome.decision
		);
	}
}
