// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project access policies.

use super::ownership::{is_personal_owner, standing};
use crate::abac::Action;
use crate::entity::{Owner, Project, User};
use crate::types::RoleName;

/// Evaluates project access for an already-resolved user.
///
/// - create: anyone may create a personal project for themselves; creating
///   under an organisation needs the owner role there
/// - read: owner or member standing
/// - update, delete: owner standing
pub fn evaluate(user: &User, action: Action, project: &Project) -> bool {
	match action {
		Action::Create => match project.owner {
			Owner::User(_) => is_personal_owner(user, project),
			Owner::Organisation(_) => standing(user, project, RoleName::Owner),
		},
		Action::Read => standing(user, project, RoleName::Member),
		Action::Update | Action::Delete => standing(user, project, RoleName::Owner),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::OrgId;

	#[test]
	fn user_can_create_own_personal_project() {
		let user = User::new("Dave");
		let project = Project::personal("User project", user.id);
		assert!(evaluate(&user, Action::Create, &project));
	}

	#[test]
	fn user_cannot_create_personal_project_for_someone_else() {
		let user = User::new("Dave");
		let project = Project::personal("User project", User::new("Daisy").id);
		assert!(!evaluate(&user, Action::Create, &project));
	}

	#[test]
	fn personal_owner_can_do_everything() {
		let user = User::new("Dave");
		let project = Project::personal("User project", user.id);
		for action in Action::all() {
			assert!(evaluate(&user, *action, &project), "{action} should be allowed");
		}
	}

	#[test]
	fn org_member_reads_but_does_not_mutate() {
		let org = OrgId::generate();
		let user = User::new("Daisy").with_role(org, RoleName::Member);
		let project = Project::organisational("Organisation project", org);

		assert!(evaluate(&user, Action::Read, &project));
		assert!(!evaluate(&user, Action::Create, &project));
		assert!(!evaluate(&user, Action::Update, &project));
		assert!(!evaluate(&user, Action::Delete, &project));
	}

	#[test]
	fn org_owner_can_do_everything() {
		let org = OrgId::generate();
		let user = User::new("Dave").with_role(org, RoleName::Owner);
		let project = Project::organisational("Organisation project", org);
		for action in Action::all() {
			assert!(evaluate(&user, *action, &project), "{action} should be allowed");
		}
	}
}
