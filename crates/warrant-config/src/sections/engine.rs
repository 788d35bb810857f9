// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Decision engine configuration section.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Handling of role names outside the recognised set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRoles {
	#[default]
	Reject,
	Ignore,
}

impl fmt::Display for UnknownRoles {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UnknownRoles::Reject => write!(f, "reject"),
			UnknownRoles::Ignore => write!(f, "ignore"),
		}
	}
}

impl FromStr for UnknownRoles {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"reject" => Ok(UnknownRoles::Reject),
			"ignore" => Ok(UnknownRoles::Ignore),
			other => Err(format!("expected 'reject' or 'ignore', got '{other}'")),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfigLayer {
	pub conceal_not_found: Option<bool>,
	pub unknown_roles: Option<UnknownRoles>,
}

impl EngineConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.conceal_not_found.is_some() {
			self.conceal_not_found = other.conceal_not_found;
		}
		if other.unknown_roles.is_some() {
			self.unknown_roles = other.unknown_roles;
		}
	}

	pub fn finalize(self) -> EngineSection {
		EngineSection {
			conceal_not_found: self.conceal_not_found.unwrap_or(true),
			unknown_roles: self.unknown_roles.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineSection {
	pub conceal_not_found: bool,
	pub unknown_roles: UnknownRoles,
}

impl Default for EngineSection {
	fn default() -> Self {
		EngineConfigLayer::default().finalize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_conceal_and_reject() {
		let section = EngineSection::default();
		assert!(section.conceal_not_found);
		assert_eq!(section.unknown_roles, UnknownRoles::Reject);
	}

	#[test]
	fn merge_prefers_later_values() {
		let mut base = EngineConfigLayer {
			conceal_not_found: Some(true),
			unknown_roles: Some(UnknownRoles::Reject),
		};
		base.merge(EngineConfigLayer {
			conceal_not_found: Some(false),
			unknown_roles: None,
		});

		assert_eq!(base.conceal_not_found, Some(false));
		assert_eq!(base.unknown_roles, Some(UnknownRoles::Reject));
	}

	#[test]
	fn unknown_roles_parses_case_insensitively() {
		assert_eq!("IGNORE".parse::<UnknownRoles>().unwrap(), UnknownRoles::Ignore);
		assert!("drop".parse::<UnknownRoles>().is_err());
	}
}
