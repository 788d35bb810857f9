// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Entity model: organisations, users, tokens, projects and requests.
//!
//! Entities are plain immutable values. They reference each other by ID; the
//! [`crate::Directory`] checks that every reference resolves.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::types::{OrgId, ProjectId, RoleName, Scope, TokenId, TokenSecret, UserId};

/// What to do with a role grant whose name is not a recognised [`RoleName`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRolePolicy {
	/// Fail construction with [`crate::AuthzError::UnknownRole`].
	#[default]
	Reject,
	/// Drop the grant; the user holds no role from it.
	Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
	pub id: OrgId,
	pub name: String,
}

impl Organisation {
	pub fn new(name: impl Into<String>) -> Self {
		Self::with_id(OrgId::generate(), name)
	}

	pub fn with_id(id: OrgId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
		}
	}
}

/// A role grant held by a user within one organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrganisationRole {
	pub organisation: OrgId,
	pub name: RoleName,
}

impl OrganisationRole {
	pub fn new(organisation: OrgId, name: RoleName) -> Self {
		Self { organisation, name }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub name: String,
	pub organisation_roles: BTreeSet<OrganisationRole>,
}

impl User {
	pub fn new(name: impl Into<String>) -> Self {
		Self::with_id(UserId::generate(), name)
	}

	pub fn with_id(id: UserId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
			organisation_roles: BTreeSet::new(),
		}
	}

	/// Builder: grant `role` in `organisation`.
	pub fn with_role(mut self, organisation: OrgId, role: RoleName) -> Self {
		self
			.organisation_roles
			.insert(OrganisationRole::new(organisation, role));
		self
	}

	/// Builder: grant a role given by its boundary string form.
	///
	/// Unrecognised names are handled according to `policy`.
	pub fn with_role_named(
		self,
		organisation: OrgId,
		role: &str,
		policy: UnknownRolePolicy,
	) -> Result<Self> {
		match (role.parse::<RoleName>(), policy) {
			(Ok(role), _) => Ok(self.with_role(organisation, role)),
			(Err(e), UnknownRolePolicy::Reject) => Err(e),
			(Err(_), UnknownRolePolicy::Ignore) => {
				warn!(user_id = %self.id, org_id = %organisation, role, "ignoring unknown role grant");
				Ok(self)
			}
		}
	}
}

/// A credential issued to a user.
///
/// A token's authority derives from its owner. Only delegate tokens may stand
/// in for the owner in ownership and role decisions; every token is subject to
/// scope checks on requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserToken {
	pub id: TokenId,
	pub owner: UserId,
	pub secret: TokenSecret,
	pub is_delegate: bool,
	pub scopes: BTreeSet<Scope>,
}

impl UserToken {
	pub fn new(owner: UserId, secret: TokenSecret) -> Self {
		Self {
			id: TokenId::generate(),
			owner,
			secret,
			is_delegate: false,
			scopes: BTreeSet::new(),
		}
	}

	/// Builder: mark the token as a delegate of its owner.
	pub fn delegate(mut self, is_delegate: bool) -> Self {
		self.is_delegate = is_delegate;
		self
	}

	/// Builder: grant scopes.
	pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
		self.scopes.extend(scopes);
		self
	}

	pub fn has_scope(&self, scope: &Scope) -> bool {
		self.scopes.contains(scope)
	}
}

/// Who owns a project. Exactly one kind, by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Owner {
	User(UserId),
	Organisation(OrgId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
	pub id: ProjectId,
	pub name: String,
	pub owner: Owner,
}

impl Project {
	pub fn new(name: impl Into<String>, owner: Owner) -> Self {
		Self {
			id: ProjectId::generate(),
			name: name.into(),
			owner,
		}
	}

	/// A personal project owned by `user`.
	pub fn personal(name: impl Into<String>, user: UserId) -> Self {
		Self::new(name, Owner::User(user))
	}

	/// A project owned by `org`.
	pub fn organisational(name: impl Into<String>, org: OrgId) -> Self {
		Self::new(name, Owner::Organisation(org))
	}
}

/// The scope requirements of a single route invocation.
///
/// An empty scope set means the route does not opt in to scope checking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
	pub route: Option<String>,
	pub scopes: BTreeSet<Scope>,
}

impl Request {
	pub fn new(scopes: impl IntoIterator<Item = Scope>) -> Self {
		Self {
			route: None,
			scopes: scopes.into_iter().collect(),
		}
	}

	/// A request for a route that declares no scopes.
	pub fn unscoped() -> Self {
		Self::default()
	}

	/// Builder: label the route, for logging.
	pub fn with_route(mut self, route: impl Into<String>) -> Self {
		self.route = Some(route.into());
		self
	}
}
