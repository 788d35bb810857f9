// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for project authorization.
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for each entity kind
//!   ([`UserId`], [`OrgId`], [`TokenId`], [`ProjectId`]) preventing accidental mixing
//! - **Role names**: The closed set of organisation roles ([`RoleName`])
//! - **Scopes**: Capability labels granted to tokens and required by routes ([`Scope`])
//! - **Token secrets**: Opaque token values that never reach logs ([`TokenSecret`])
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::AuthzError;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(OrgId, "Unique identifier for an organisation.");
define_id_type!(TokenId, "Unique identifier for a user token.");
define_id_type!(ProjectId, "Unique identifier for a project.");

// =============================================================================
// Role Names
// =============================================================================

/// Roles a user can hold within an organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
	/// Can create, update and delete organisation projects.
	Owner,
	/// Can read organisation projects.
	Member,
}

impl RoleName {
	/// Returns all available role names.
	pub fn all() -> &'static [RoleName] {
		&[RoleName::Owner, RoleName::Member]
	}

	/// Returns true if holding this role satisfies a requirement for `required`.
	///
	/// Owner satisfies both levels; member satisfies only member.
	pub fn satisfies(&self, required: RoleName) -> bool {
		matches!(
			(self, required),
			(RoleName::Owner, _) | (RoleName::Member, RoleName::Member)
		)
	}
}

impl fmt::Display for RoleName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RoleName::Owner => write!(f, "owner"),
			RoleName::Member => write!(f, "member"),
		}
	}
}

impl FromStr for RoleName {
	type Err = AuthzError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"owner" => Ok(RoleName::Owner),
			"member" => Ok(RoleName::Member),
			other => Err(AuthzError::UnknownRole(other.to_string())),
		}
	}
}

// =============================================================================
// Scopes
// =============================================================================

/// A capability label such as `read.project`.
///
/// Scopes are compared by exact string equality. Empty labels and labels
/// containing whitespace are rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Scope(String);

impl Scope {
	pub fn new(label: impl Into<String>) -> Result<Self, AuthzError> {
		let label = label.into();
		if label.is_empty() || label.chars().any(char::is_whitespace) {
			return Err(AuthzError::InvalidScope(label));
		}
		Ok(Self(label))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl FromStr for Scope {
	type Err = AuthzError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

impl TryFrom<String> for Scope {
	type Error = AuthzError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl From<Scope> for String {
	fn from(scope: Scope) -> Self {
		scope.0
	}
}

// =============================================================================
// Token Secrets
// =============================================================================

/// Placeholder shown instead of a secret value.
pub const REDACTED: &str = "[REDACTED]";

/// The opaque value a token was issued with.
///
/// Authorization never compares secrets. The value is redacted from `Debug`
/// and `Display` output and wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct TokenSecret(String);

impl TokenSecret {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw secret. Callers must not log the result.
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for TokenSecret {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl fmt::Display for TokenSecret {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}
