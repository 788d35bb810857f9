// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for policy evaluation.
//!
//! - [`Actor`]: Who is asking (a user, or a token acting for one)
//! - [`Action`]: The operation being performed on a resource
//! - [`Resource`]: What is being acted on
//! - [`Decision`]: The terminal outcome, with a [`DenyReason`] on denial

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::entity::{Project, User, UserToken};
use crate::error::AuthzError;

/// The entity requesting authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor<'a> {
	User(&'a User),
	Token(&'a UserToken),
}

impl<'a> Actor<'a> {
	/// Short label for logs; never includes secret material.
	pub fn label(&self) -> String {
		match self {
			Actor::User(user) => format!("user:{}", user.id),
			Actor::Token(token) => format!("token:{}", token.id),
		}
	}
}

/// Actions that can be performed on resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Action {
	Create,
	Read,
	Update,
	Delete,
}

impl Action {
	pub fn all() -> &'static [Action] {
		&[Action::Create, Action::Read, Action::Update, Action::Delete]
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Action::Create => write!(f, "create"),
			Action::Read => write!(f, "read"),
			Action::Update => write!(f, "update"),
			Action::Delete => write!(f, "delete"),
		}
	}
}

impl FromStr for Action {
	type Err = AuthzError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"create" => Ok(Action::Create),
			"read" => Ok(Action::Read),
			"update" => Ok(Action::Update),
			"delete" => Ok(Action::Delete),
			other => Err(AuthzError::UnknownAction(other.to_string())),
		}
	}
}

/// Resources that can be protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Resource<'a> {
	Project(&'a Project),
}

/// Why a decision was a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
	/// The rules were evaluated and the actor's standing is insufficient.
	NotAuthorized,
	/// The resource, or an entity it references, is not in the directory.
	NotFound,
	/// The token lacks a scope the request requires.
	InsufficientScope,
}

impl fmt::Display for DenyReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DenyReason::NotAuthorized => write!(f, "not_authorized"),
			DenyReason::NotFound => write!(f, "not_found"),
			DenyReason::InsufficientScope => write!(f, "insufficient_scope"),
		}
	}
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Decision {
	Allow,
	Deny(DenyReason),
}

impl Decision {
	pub fn is_allowed(&self) -> bool {
		matches!(self, Decision::Allow)
	}

	pub fn reason(&self) -> Option<DenyReason> {
		match self {
			Decision::Allow => None,
			Decision::Deny(reason) => Some(*reason),
		}
	}

	/// Allow when `allowed`, otherwise deny with `reason`.
	pub fn from_bool(allowed: bool, reason: DenyReason) -> Self {
		if allowed {
			Decision::Allow
		} else {
			Decision::Deny(reason)
		}
	}

	/// Collapses `NotFound` into `NotAuthorized` so callers cannot probe for
	/// existence.
	pub fn concealed(self) -> Self {
		match self {
			Decision::Deny(DenyReason::NotFound) => Decision::Deny(DenyReason::NotAuthorized),
			other => other,
		}
	}
}

impl fmt::Display for Decision {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Decision::Allow => write!(f, "allow"),
			Decision::Deny(reason) => write!(f, "deny ({reason})"),
		}
	}
}

impl Serialize for Decision {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Decision::Allow => {
				let mut state = serializer.serialize_struct("Decision", 1)?;
				state.serialize_field("allow", &true)?;
				state.end()
			}
			Decision::Deny(reason) => {
				let mut state = serializer.serialize_struct("Decision", 2)?;
				state.serialize_field("allow", &false)?;
				state.serialize_field("reason", reason)?;
				state.end()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn action_parses_and_displays() {
		for action in Action::all() {
			assert_eq!(action.to_string().parse::<Action>().unwrap(), *action);
		}
		assert!(matches!(
			"share".parse::<Action>(),
			Err(AuthzError::UnknownAction(_))
		));
	}

	#[test]
	fn concealed_hides_not_found_only() {
		assert_eq!(
			Decision::Deny(DenyReason::NotFound).concealed(),
			Decision::Deny(DenyReason::NotAuthorized)
		);
		assert_eq!(
			Decision::Deny(DenyReason::InsufficientScope).concealed(),
			Decision::Deny(DenyReason::InsufficientScope)
		);
		assert_eq!(Decision::Allow.concealed(), Decision::Allow);
	}

	#[test]
	fn decision_serializes_for_audit() {
		let allow = serde_json::to_string(&Decision::Allow).unwrap();
		assert_eq!(allow, r#"{"allow":true}"#);

		let deny = serde_json::to_string(&Decision::Deny(DenyReason::NotFound)).unwrap();
		assert_eq!(deny, r#"{"allow":false,"reason":"not_found"}"#);
	}

	#[test]
	fn from_bool_picks_reason_on_false() {
		assert_eq!(
			Decision::from_bool(false, DenyReason::InsufficientScope).reason(),
			Some(DenyReason::InsufficientScope)
		);
		assert!(Decision::from_bool(true, DenyReason::NotAuthorized).is_allowed());
	}
}
