// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::WarrantConfigLayer;
use crate::sections::{EngineConfigLayer, LogFormat, LoggingConfigLayer, UnknownRoles};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<WarrantConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<WarrantConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(WarrantConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/warrant/warrant.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<WarrantConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(WarrantConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: WarrantConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: WARRANT_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<WarrantConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_from(|name| std::env::var(name).ok())
	}
}

fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<WarrantConfigLayer, ConfigError> {
	let var = |name: &str| lookup(name).filter(|s| !s.is_empty());

	let engine = EngineConfigLayer {
		conceal_not_found: parse_bool(
			"WARRANT_ENGINE_CONCEAL_NOT_FOUND",
			var("WARRANT_ENGINE_CONCEAL_NOT_FOUND"),
		)?,
		unknown_roles: parse_with::<UnknownRoles>(
			"WARRANT_ENGINE_UNKNOWN_ROLES",
			var("WARRANT_ENGINE_UNKNOWN_ROLES"),
		)?,
	};

	let logging = LoggingConfigLayer {
		level: var("WARRANT_LOGGING_LEVEL"),
		format: parse_with::<LogFormat>("WARRANT_LOGGING_FORMAT", var("WARRANT_LOGGING_FORMAT"))?,
	};

	Ok(WarrantConfigLayer {
		engine: Some(engine),
		logging: Some(logging),
	})
}

fn parse_bool(key: &str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
	match value {
		None => Ok(None),
		Some(v) => match v.to_lowercase().as_str() {
			"1" | "true" | "yes" => Ok(Some(true)),
			"0" | "false" | "no" => Ok(Some(false)),
			_ => Err(ConfigError::InvalidValue {
				key: key.to_string(),
				message: format!("invalid boolean value '{v}'"),
			}),
		},
	}
}

fn parse_with<T>(key: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
	T: FromStr<Err = String>,
{
	value
		.map(|v| {
			v.parse::<T>().map_err(|message| ConfigError::InvalidValue {
				key: key.to_string(),
				message,
			})
		})
		.transpose()
}
