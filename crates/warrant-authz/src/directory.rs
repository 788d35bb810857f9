// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Immutable snapshot of the entity graph.
//!
//! A [`Directory`] is assembled once through [`DirectoryBuilder`], which
//! verifies that every role grant, token owner and project owner refers to an
//! entity in the same snapshot. Decisions read from it and never mutate it.

use std::collections::HashMap;

use crate::entity::{Organisation, Owner, Project, User, UserToken};
use crate::error::DirectoryError;
use crate::types::{OrgId, ProjectId, TokenId, UserId};

#[derive(Debug, Clone, Default)]
pub struct Directory {
	organisations: HashMap<OrgId, Organisation>,
	users: HashMap<UserId, User>,
	tokens: HashMap<TokenId, UserToken>,
	projects: HashMap<ProjectId, Project>,
}

impl Directory {
	pub fn builder() -> DirectoryBuilder {
		DirectoryBuilder::default()
	}

	pub fn organisation(&self, id: OrgId) -> Option<&Organisation> {
		self.organisations.get(&id)
	}

	pub fn user(&self, id: UserId) -> Option<&User> {
		self.users.get(&id)
	}

	pub fn token(&self, id: TokenId) -> Option<&UserToken> {
		self.tokens.get(&id)
	}

	pub fn project(&self, id: ProjectId) -> Option<&Project> {
		self.projects.get(&id)
	}

	/// Returns true if the project's owner is present in this snapshot.
	pub fn has_owner(&self, owner: Owner) -> bool {
		match owner {
			Owner::User(id) => self.users.contains_key(&id),
			Owner::Organisation(id) => self.organisations.contains_key(&id),
		}
	}
}

/// Collects entities and validates references on [`DirectoryBuilder::build`].
#[derive(Debug, Default)]
pub struct DirectoryBuilder {
	organisations: Vec<Organisation>,
	users: Vec<User>,
	tokens: Vec<UserToken>,
	projects: Vec<Project>,
}

impl DirectoryBuilder {
	pub fn organisation(mut self, organisation: Organisation) -> Self {
		self.organisations.push(organisation);
		self
	}

	pub fn user(mut self, user: User) -> Self {
		self.users.push(user);
		self
	}

	pub fn token(mut self, token: UserToken) -> Self {
		self.tokens.push(token);
		self
	}

	pub fn project(mut self, project: Project) -> Self {
		self.projects.push(project);
		self
	}

	pub fn build(self) -> Result<Directory, DirectoryError> {
		let mut directory = Directory::default();

		for org in self.organisations {
			insert_unique(&mut directory.organisations, org.id, org, "organisation")?;
		}

		for user in self.users {
			for grant in &user.organisation_roles {
				if !directory.organisations.contains_key(&grant.organisation) {
					return Err(DirectoryError::DanglingRoleOrganisation {
						user: user.id,
						org: grant.organisation,
					});
				}
			}
			insert_unique(&mut directory.users, user.id, user, "user")?;
		}

		for token in self.tokens {
			if !directory.users.contains_key(&token.owner) {
				return Err(DirectoryError::DanglingTokenOwner {
					token: token.id,
					user: token.owner,
				});
			}
			insert_unique(&mut directory.tokens, token.id, token, "token")?;
		}

		for project in self.projects {
			if !directory.has_owner(project.owner) {
				return Err(match project.owner {
					Owner::User(user) => DirectoryError::DanglingProjectUser {
						project: project.id,
						user,
					},
					Owner::Organisation(org) => DirectoryError::DanglingProjectOrganisation {
						project: project.id,
						org,
					},
				});
			}
			insert_unique(&mut directory.projects, project.id, project, "project")?;
		}

		Ok(directory)
	}
}

fn insert_unique<K, V>(
	map: &mut HashMap<K, V>,
	key: K,
	value: V,
	kind: &'static str,
) -> Result<(), DirectoryError>
where
	K: std::hash::Hash + Eq + std::fmt::Display,
{
	if map.contains_key(&key) {
		return Err(DirectoryError::DuplicateId {
			kind,
			id: key.to_string(),
		});
	}
	map.insert(key, value);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{RoleName, TokenSecret};

	#[test]
	fn builds_consistent_graph() {
		let org = Organisation::new("Unlimited Ltd.");
		let user = User::new("Dave").with_role(org.id, RoleName::Owner);
		let token = UserToken::new(user.id, TokenSecret::new("t"));
		let project = Project::organisational("Organisation project", org.id);
		let (user_id, token_id, project_id) = (user.id, token.id, project.id);

		let directory = Directory::builder()
			.organisation(org)
			.user(user)
			.token(token)
			.project(project)
			.build()
			.unwrap();

		assert!(directory.user(user_id).is_some());
		assert_eq!(directory.token(token_id).unwrap().owner, user_id);
		assert!(directory.project(project_id).is_some());
	}

	#[test]
	fn rejects_role_in_unknown_organisation() {
		let stray = OrgId::generate();
		let user = User::new("Dave").with_role(stray, RoleName::Member);
		let user_id = user.id;

		let err = Directory::builder().user(user).build().unwrap_err();
		assert_eq!(
			err,
			DirectoryError::DanglingRoleOrganisation {
				user: user_id,
				org: stray
			}
		);
	}

	#[test]
	fn rejects_token_for_unknown_user() {
		let token = UserToken::new(UserId::generate(), TokenSecret::new("t"));
		let err = Directory::builder().token(token).build().unwrap_err();
		assert!(matches!(err, DirectoryError::DanglingTokenOwner { .. }));
	}

	#[test]
	fn rejects_project_with_unknown_owner() {
		let personal = Project::personal("p", UserId::generate());
		let err = Directory::builder().project(personal).build().unwrap_err();
		assert!(matches!(err, DirectoryError::DanglingProjectUser { .. }));

		let org_owned = Project::organisational("p", OrgId::generate());
		let err = Directory::builder().project(org_owned).build().unwrap_err();
		assert!(matches!(
			err,
			DirectoryError::DanglingProjectOrganisation { .. }
		));
	}

	#[test]
	fn rejects_duplicate_ids() {
		let user = User::new("Dave");
		let twin = user.clone();
		let err = Directory::builder().user(user).user(twin).build().unwrap_err();
		assert!(matches!(err, DirectoryError::DuplicateId { kind: "user", .. }));
	}
}
