// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use warrant_config::{LogFormat, LoggingConfig};

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init(config: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

	let builder = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr);

	match config.format {
		LogFormat::Json => builder.json().init(),
		LogFormat::Pretty => builder.init(),
	}
}
