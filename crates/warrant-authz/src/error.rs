// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for entity construction.
//!
//! Authorization denials are not errors; see [`crate::abac::Decision`].

use thiserror::Error;

use crate::types::{OrgId, ProjectId, TokenId, UserId};

/// Result type for construction operations.
pub type Result<T> = std::result::Result<T, AuthzError>;

/// Errors raised while building entities from boundary input.
#[derive(Debug, Error)]
pub enum AuthzError {
	#[error("unknown role name: {0}")]
	UnknownRole(String),

	#[error("unknown action: {0}")]
	UnknownAction(String),

	#[error("invalid scope: {0:?}")]
	InvalidScope(String),
}

/// Referential integrity failures raised while assembling a [`crate::Directory`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
	#[error("user {user} holds a role in unknown organisation {org}")]
	DanglingRoleOrganisation { user: UserId, org: OrgId },

	#[error("token {token} is owned by unknown user {user}")]
	DanglingTokenOwner { token: TokenId, user: UserId },

	#[error("project {project} is owned by unknown user {user}")]
	DanglingProjectUser { project: ProjectId, user: UserId },

	#[error("project {project} is owned by unknown organisation {org}")]
	DanglingProjectOrganisation { project: ProjectId, org: OrgId },

	#[error("duplicate {kind} id {id}")]
	DuplicateId { kind: &'static str, id: String },
}
