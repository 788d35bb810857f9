// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project ownership standing.
//!
//! Personal projects are governed by exact ownership alone; organisation
//! roles never reach them. Organisation projects are governed by the role the
//! user holds in the owning organisation.

use super::roles;
use crate::entity::{Owner, Project, User};
use crate::types::RoleName;

/// Returns true if `user` has at least `required` standing over `project`.
pub fn standing(user: &User, project: &Project, required: RoleName) -> bool {
	match project.owner {
		Owner::User(owner_id) => owner_id == user.id,
		Owner::Organisation(org_id) => roles::holds_at_least(user, org_id, required),
	}
}

/// Returns true if `user` is the direct owner of a personal project.
pub fn is_personal_owner(user: &User, project: &Project) -> bool {
	matches!(project.owner, Owner::User(owner_id) if owner_id == user.id)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::OrgId;

	mod personal_projects {
		use super::*;

		#[test]
		fn owner_has_full_standing() {
			let user = User::new("Dave");
			let project = Project::personal("User project", user.id);

			assert!(standing(&user, &project, RoleName::Owner));
			assert!(standing(&user, &project, RoleName::Member));
			assert!(is_personal_owner(&user, &project));
		}

		#[test]
		fn other_user_has_none() {
			let owner = User::new("Dave");
			let other = User::new("Daisy");
			let project = Project::personal("User project", owner.id);

			assert!(!standing(&other, &project, RoleName::Member));
			assert!(!standing(&other, &project, RoleName::Owner));
		}

		#[test]
		fn org_roles_do_not_leak_into_personal_projects() {
			let org = OrgId::generate();
			let owner = User::new("Dave").with_role(org, RoleName::Member);
			let org_owner = User::new("Daisy").with_role(org, RoleName::Owner);
			let project = Project::personal("User project", owner.id);

			assert!(!standing(&org_owner, &project, RoleName::Member));
		}
	}

	mod organisation_projects {
		use super::*;

		#[test]
		fn org_owner_has_owner_standing() {
			let org = OrgId::generate();
			let user = User::new("Dave").with_role(org, RoleName::Owner);
			let project = Project::organisational("Organisation project", org);

			assert!(standing(&user, &project, RoleName::Owner));
			assert!(standing(&user, &project, RoleName::Member));
			assert!(!is_personal_owner(&user, &project));
		}

		#[test]
		fn org_member_has_member_standing_only() {
			let org = OrgId::generate();
			let user = User::new("Daisy").with_role(org, RoleName::Member);
			let project = Project::organisational("Organisation project", org);

			assert!(standing(&user, &project, RoleName::Member));
			assert!(!standing(&user, &project, RoleName::Owner));
		}

		#[test]
		fn role_in_another_org_does_not_count() {
			let org = OrgId::generate();
			let user = User::new("Duke").with_role(OrgId::generate(), RoleName::Owner);
			let project = Project::organisational("Organisation project", org);

			assert!(!standing(&user, &project, RoleName::Member));
		}
	}
}
