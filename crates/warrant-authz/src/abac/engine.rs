// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy evaluation engine.
//!
//! [`Engine::authorize`] evaluates an action on a resource in two phases:
//!
//! 1. **Delegation**: resolve the actor to the user whose standing applies
//! 2. **Resource policy**: delegate to the resource-specific policy module
//!
//! [`Engine::authorize_request`] checks a token's scopes against a route.
//!
//! The engine holds only its configuration. Every call is a pure function of
//! its arguments, so one engine can be shared across threads.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::policies::{delegation, project, scope};
use super::types::{Action, Actor, Decision, DenyReason, Resource};
use crate::directory::Directory;
use crate::entity::Request;
use crate::types::ProjectId;

/// Engine behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
	/// Report `NotFound` as `NotAuthorized` from the boolean and outward helpers.
	pub conceal_not_found: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			conceal_not_found: true,
		}
	}
}

/// Authorization decision engine.
#[derive(Debug, Clone, Default)]
pub struct Engine {
	config: EngineConfig,
}

impl Engine {
	pub fn new(config: EngineConfig) -> Self {
		Self { config }
	}

	/// Decides whether `actor` may perform `action` on `resource`.
	///
	/// The returned decision carries the precise [`DenyReason`]; use
	/// [`Engine::outward`] before exposing it to the requester.
	#[instrument(
		level = "debug",
		skip(self, directory, actor, resource),
		fields(actor = %actor.label(), action = %action)
	)]
	pub fn authorize(
		&self,
		directory: &Directory,
		actor: Actor<'_>,
		action: Action,
		resource: Resource<'_>,
	) -> Decision {
		let user = match delegation::effective_actor(directory, actor) {
			delegation::Delegation::Acting(user) => user,
			delegation::Delegation::NoAuthority => {
				debug!("non-delegate token cannot act for its owner");
				return Decision::Deny(DenyReason::NotAuthorized);
			}
			delegation::Delegation::OwnerMissing(owner) => {
				debug!(owner_id = %owner, "token owner not in directory");
				return Decision::Deny(DenyReason::NotFound);
			}
		};

		let decision = match resource {
			Resource::Project(target) => {
				let registered = directory.project(target.id);
				if registered.is_some_and(|known| known != target) {
					debug!(project_id = %target.id, "project differs from directory copy");
					return Decision::Deny(DenyReason::NotFound);
				}
				// Only a create may name a project the directory does not hold yet.
				if registered.is_none() && action != Action::Create {
					debug!(project_id = %target.id, "project not in directory");
					return Decision::Deny(DenyReason::NotFound);
				}
				if !directory.has_owner(target.owner) {
					debug!(project_id = %target.id, "project owner not in directory");
					return Decision::Deny(DenyReason::NotFound);
				}
				Decision::from_bool(
					project::evaluate(user, action, target),
					DenyReason::NotAuthorized,
				)
			}
		};

		debug!(user_id = %user.id, %decision, "authorization evaluated");
		decision
	}

	/// Looks `project_id` up in `directory` and authorizes `action` on it.
	pub fn authorize_project(
		&self,
		directory: &Directory,
		actor: Actor<'_>,
		action: Action,
		project_id: ProjectId,
	) -> Decision {
		match directory.project(project_id) {
			Some(target) => self.authorize(directory, actor, action, Resource::Project(target)),
			None => {
				debug!(%project_id, "project not in directory");
				Decision::Deny(DenyReason::NotFound)
			}
		}
	}

	/// Decides whether `actor` may invoke the route described by `request`.
	///
	/// Users are not scope-restricted. Tokens must hold every required scope.
	#[instrument(
		level = "debug",
		skip(self, actor, request),
		fields(actor = %actor.label(), route = request.route.as_deref().unwrap_or("-"))
	)]
	pub fn authorize_request(&self, actor: Actor<'_>, request: &Request) -> Decision {
		let Actor::Token(token) = actor else {
			return Decision::Allow;
		};

		if scope::satisfies(token, request) {
			return Decision::Allow;
		}

		let missing: Vec<&str> = scope::missing_scopes(token, request)
			.into_iter()
			.map(|s| s.as_str())
			.collect();
		debug!(?missing, "token lacks required scopes");
		Decision::Deny(DenyReason::InsufficientScope)
	}

	/// Applies the configured existence hiding to a decision.
	pub fn outward(&self, decision: Decision) -> Decision {
		if self.config.conceal_not_found {
			decision.concealed()
		} else {
			decision
		}
	}

	/// Boolean form of [`Engine::authorize`].
	pub fn check(
		&self,
		directory: &Directory,
		actor: Actor<'_>,
		action: Action,
		resource: Resource<'_>,
	) -> bool {
		self
			.outward(self.authorize(directory, actor, action, resource))
			.is_allowed()
	}

	/// Boolean form of [`Engine::authorize_request`].
	pub fn check_request(&self, actor: Actor<'_>, request: &Request) -> bool {
		self.authorize_request(actor, request).is_allowed()
	}
}
