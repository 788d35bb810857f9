// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribute-based policy evaluation for projects and routes.
//!
//! All policy functions are pure: they read a [`crate::Directory`] snapshot and
//! the entities handed to them, and never mutate or perform I/O.

pub mod engine;
pub mod policies;
pub mod types;

pub use engine::{Engine, EngineConfig};
pub use policies::delegation::{effective_actor, Delegation};
pub use policies::ownership::standing;
pub use policies::roles::roles_of;
pub use policies::scope::{missing_scopes, satisfies};
pub use types::{Action, Actor, Decision, DenyReason, Resource};
