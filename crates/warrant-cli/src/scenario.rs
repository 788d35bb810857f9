// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scenario files: a named entity graph plus expected authorization outcomes.
//!
//! Entities refer to each other by name. Users and tokens share one actor
//! namespace so a check can name either.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use warrant_authz::{
	Action, Actor, Decision, Directory, Engine, OrgId, Organisation, Owner, Project, ProjectId,
	Request, Scope, TokenId, TokenSecret, UnknownRolePolicy, User, UserId, UserToken,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
	#[serde(default)]
	pub organisations: Vec<OrganisationSpec>,
	#[serde(default)]
	pub users: Vec<UserSpec>,
	#[serde(default)]
	pub tokens: Vec<TokenSpec>,
	#[serde(default)]
	pub projects: Vec<ProjectSpec>,
	#[serde(default)]
	pub checks: Vec<CheckSpec>,
	#[serde(default)]
	pub request_checks: Vec<RequestCheckSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganisationSpec {
	pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSpec {
	pub name: String,
	#[serde(default)]
	pub roles: Vec<RoleSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleSpec {
	pub organisation: String,
	pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSpec {
	pub name: String,
	pub owner: String,
	#[serde(default)]
	pub secret: String,
	#[serde(default)]
	pub delegate: bool,
	#[serde(default)]
	pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerSpec {
	User(String),
	Organisation(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSpec {
	pub name: String,
	pub owner: OwnerSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckSpec {
	pub actor: String,
	pub action: String,
	pub project: String,
	pub expect: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestCheckSpec {
	pub actor: String,
	#[serde(default)]
	pub route: Option<String>,
	#[serde(default)]
	pub scopes: Vec<String>,
	pub expect: bool,
}

impl Scenario {
	pub fn from_path(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("failed to read scenario {}", path.display()))?;
		Self::parse(&content).with_context(|| format!("invalid scenario {}", path.display()))
	}

	pub fn parse(content: &str) -> Result<Self> {
		Ok(toml::from_str(content)?)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActorRef {
	User(UserId),
	Token(TokenId),
}

/// A scenario's entities, assembled into a directory with name lookups.
#[derive(Debug)]
pub struct World {
	pub directory: Directory,
	actors: HashMap<String, ActorRef>,
	organisations: HashMap<String, OrgId>,
	projects: HashMap<String, ProjectId>,
}

impl World {
	pub fn build(scenario: &Scenario, unknown_roles: UnknownRolePolicy) -> Result<Self> {
		let mut builder = Directory::builder();
		let mut world = World {
			directory: Directory::default(),
			actors: HashMap::new(),
			organisations: HashMap::new(),
			projects: HashMap::new(),
		};

		for spec in &scenario.organisations {
			let org = Organisation::new(&spec.name);
			if world.organisations.insert(spec.name.clone(), org.id).is_some() {
				bail!("duplicate organisation name '{}'", spec.name);
			}
			builder = builder.organisation(org);
		}

		for spec in &scenario.users {
			let mut user = User::new(&spec.name);
			for grant in &spec.roles {
				let org = world.organisation(&grant.organisation)?;
				user = user
					.with_role_named(org, &grant.role, unknown_roles)
					.with_context(|| format!("user '{}'", spec.name))?;
			}
			world.insert_actor(&spec.name, ActorRef::User(user.id))?;
			builder = builder.user(user);
		}

		for spec in &scenario.tokens {
			let owner = match world.actors.get(&spec.owner) {
				Some(ActorRef::User(id)) => *id,
				_ => bail!("token '{}' is owned by unknown user '{}'", spec.name, spec.owner),
			};
			let scopes = spec
				.scopes
				.iter()
				.map(Scope::new)
				.collect::<Result<Vec<_>, _>>()
				.with_context(|| format!("token '{}'", spec.name))?;
			let token = UserToken::new(owner, TokenSecret::new(spec.secret.as_str()))
				.delegate(spec.delegate)
				.with_scopes(scopes);
			world.insert_actor(&spec.name, ActorRef::Token(token.id))?;
			builder = builder.token(token);
		}

		for spec in &scenario.projects {
			let owner = match &spec.owner {
				OwnerSpec::User(name) => match world.actors.get(name) {
					Some(ActorRef::User(id)) => Owner::User(*id),
					_ => bail!("project '{}' is owned by unknown user '{name}'", spec.name),
				},
				OwnerSpec::Organisation(name) => Owner::Organisation(world.organisation(name)?),
			};
			let project = Project::new(&spec.name, owner);
			if world.projects.insert(spec.name.clone(), project.id).is_some() {
				bail!("duplicate project name '{}'", spec.name);
			}
			builder = builder.project(project);
		}

		world.directory = builder.build()?;
		debug!(
			actors = world.actors.len(),
			projects = world.projects.len(),
			"scenario world built"
		);
		Ok(world)
	}

	fn organisation(&self, name: &str) -> Result<OrgId> {
		self
			.organisations
			.get(name)
			.copied()
			.ok_or_else(|| anyhow!("unknown organisation '{name}'"))
	}

	fn insert_actor(&mut self, name: &str, actor: ActorRef) -> Result<()> {
		if self.actors.insert(name.to_string(), actor).is_some() {
			bail!("duplicate actor name '{name}'");
		}
		Ok(())
	}

	fn actor(&self, name: &str) -> Result<Actor<'_>> {
		let reference = self
			.actors
			.get(name)
			.ok_or_else(|| anyhow!("unknown actor '{name}'"))?;
		let actor = match reference {
			ActorRef::User(id) => self.directory.user(*id).map(Actor::User),
			ActorRef::Token(id) => self.directory.token(*id).map(Actor::Token),
		};
		actor.ok_or_else(|| anyhow!("actor '{name}' missing from directory"))
	}

	fn project(&self, name: &str) -> Result<ProjectId> {
		self
			.projects
			.get(name)
			.copied()
			.ok_or_else(|| anyhow!("unknown project '{name}'"))
	}
}

/// Result of evaluating one expectation.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
	pub description: String,
	pub expected: bool,
	pub actual: bool,
	pub decision: Decision,
}

impl Outcome {
	pub fn passed(&self) -> bool {
		self.expected == self.actual
	}
}

/// Evaluates every check in `scenario` against `world`.
pub fn run(scenario: &Scenario, world: &World, engine: &Engine) -> Result<Vec<Outcome>> {
	let mut outcomes = Vec::with_capacity(scenario.checks.len() + scenario.request_checks.len());

	for check in &scenario.checks {
		let actor = world.actor(&check.actor)?;
		let action: Action = check.action.parse()?;
		let project_id = world.project(&check.project)?;
		let decision = engine.authorize_project(&world.directory, actor, action, project_id);
		let actual = engine.outward(decision).is_allowed();

		outcomes.push(Outcome {
			description: format!("{} {} {}", check.actor, check.action, check.project),
			expected: check.expect,
			actual,
			decision,
		});
	}

	for check in &scenario.request_checks {
		let actor = world.actor(&check.actor)?;
		let scopes = check
			.scopes
			.iter()
			.map(Scope::new)
			.collect::<Result<Vec<_>, _>>()?;
		let mut request = Request::new(scopes);
		if let Some(route) = &check.route {
			request = request.with_route(route);
		}

		let decision = engine.authorize_request(actor, &request);
		outcomes.push(Outcome {
			description: format!("{} requests [{}]", check.actor, check.scopes.join(", ")),
			expected: check.expect,
			actual: engine.check_request(actor, &request),
			decision,
		});
	}

	Ok(outcomes)
}

#[cfg(test)]
mod tests {
	use super::*;
	use warrant_authz::{DenyReason, EngineConfig};

	const ORGANISATION_DEMO: &str = include_str!("../../../demos/organisation.toml");

	fn run_str(content: &str) -> Result<Vec<Outcome>> {
		let scenario = Scenario::parse(content)?;
		let world = World::build(&scenario, UnknownRolePolicy::Reject)?;
		run(&scenario, &world, &Engine::default())
	}

	#[test]
	fn organisation_demo_passes() {
		let outcomes = run_str(ORGANISATION_DEMO).unwrap();
		assert!(!outcomes.is_empty());
		for outcome in &outcomes {
			assert!(outcome.passed(), "failed: {}", outcome.description);
		}
	}

	#[test]
	fn mismatch_is_reported() {
		let outcomes = run_str(
			r#"
			[[users]]
			name = "Dave"

			[[users]]
			name = "Daisy"

			[[projects]]
			name = "User project"
			owner = { user = "Dave" }

			[[checks]]
			actor = "Daisy"
			action = "read"
			project = "User project"
			expect = true
			"#,
		)
		.unwrap();

		assert_eq!(outcomes.len(), 1);
		assert!(!outcomes[0].passed());
		assert_eq!(
			outcomes[0].decision,
			Decision::Deny(DenyReason::NotAuthorized)
		);
	}

	#[test]
	fn request_checks_use_token_scopes() {
		let outcomes = run_str(
			r#"
			[[users]]
			name = "Dave"

			[[tokens]]
			name = "cli"
			owner = "Dave"
			scopes = ["read.project"]

			[[request_checks]]
			actor = "cli"
			scopes = ["display.project"]
			expect = false
			"#,
		)
		.unwrap();

		assert!(outcomes[0].passed());
		assert_eq!(
			outcomes[0].decision,
			Decision::Deny(DenyReason::InsufficientScope)
		);
	}

	#[test]
	fn unknown_role_is_rejected_or_ignored_per_policy() {
		let content = r#"
			[[organisations]]
			name = "Unlimited Ltd."

			[[users]]
			name = "Dave"
			roles = [{ organisation = "Unlimited Ltd.", role = "admin" }]
		"#;
		let scenario = Scenario::parse(content).unwrap();

		assert!(World::build(&scenario, UnknownRolePolicy::Reject).is_err());
		assert!(World::build(&scenario, UnknownRolePolicy::Ignore).is_ok());
	}

	#[test]
	fn dangling_names_are_errors() {
		let scenario = Scenario::parse(
			r#"
			[[projects]]
			name = "Orphan"
			owner = { organisation = "Nowhere" }
			"#,
		)
		.unwrap();
		assert!(World::build(&scenario, UnknownRolePolicy::Reject).is_err());

		let err = run_str(
			r#"
			[[users]]
			name = "Dave"

			[[checks]]
			actor = "Dave"
			action = "read"
			project = "Missing"
			expect = false
			"#,
		)
		.unwrap_err();
		assert!(err.to_string().contains("unknown project"));
	}

	#[test]
	fn users_and_tokens_share_actor_names() {
		let scenario = Scenario::parse(
			r#"
			[[users]]
			name = "Dave"

			[[tokens]]
			name = "Dave"
			owner = "Dave"
			"#,
		)
		.unwrap();
		assert!(World::build(&scenario, UnknownRolePolicy::Reject).is_err());
	}

	#[test]
	fn demo_passes_without_concealment() {
		let scenario = Scenario::parse(ORGANISATION_DEMO).unwrap();
		let world = World::build(&scenario, UnknownRolePolicy::Reject).unwrap();
		let engine = Engine::new(EngineConfig {
			conceal_not_found: false,
		});

		let outcomes = run(&scenario, &world, &engine).unwrap();
		assert!(outcomes.iter().all(Outcome::passed));
	}
}
