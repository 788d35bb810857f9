// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by a single source.

use serde::{Deserialize, Serialize};

use crate::sections::{EngineConfigLayer, LoggingConfigLayer};

/// One source's view of the configuration. Absent fields defer to other layers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WarrantConfigLayer {
	pub engine: Option<EngineConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

impl WarrantConfigLayer {
	/// Overlays `other` on top of `self`; values present in `other` win.
	pub fn merge(&mut self, other: Self) {
		merge_section(&mut self.engine, other.engine, EngineConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T>(target: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	let Some(incoming) = other else {
		return;
	};
	match target {
		Some(existing) => merge(existing, incoming),
		None => *target = Some(incoming),
	}
}
