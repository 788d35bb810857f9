// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolvers and per-resource policies consulted by the engine.

pub mod delegation;
pub mod ownership;
pub mod project;
pub mod roles;
pub mod scope;
