// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for Warrant.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`WARRANT_*`)
//!
//! # Usage
//!
//! ```ignore
//! use warrant_config::load_config;
//!
//! let config = load_config()?;
//! println!("conceal not found: {}", config.engine.conceal_not_found);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::WarrantConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarrantConfig {
	pub engine: EngineSection,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`WARRANT_*`)
/// 2. Config file (`/etc/warrant/warrant.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<WarrantConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<WarrantConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge the given sources in precedence order and finalize.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<WarrantConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = WarrantConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: WarrantConfigLayer) -> Result<WarrantConfig, ConfigError> {
	let engine = layer.engine.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&logging)?;

	info!(
		conceal_not_found = engine.conceal_not_found,
		unknown_roles = %engine.unknown_roles,
		log_level = %logging.level,
		log_format = %logging.format,
		"configuration loaded"
	);

	Ok(WarrantConfig { engine, logging })
}

fn validate_config(logging: &LoggingConfig) -> Result<(), ConfigError> {
	if logging.level.trim().is_empty() {
		return Err(ConfigError::Validation(
			"logging level must not be blank".to_string(),
		));
	}

	Ok(())
}
