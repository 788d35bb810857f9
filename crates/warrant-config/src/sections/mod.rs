// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod engine;
mod logging;

pub use engine::{EngineConfigLayer, EngineSection, UnknownRoles};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
