// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organisation role resolution.

use std::collections::BTreeSet;

use crate::entity::User;
use crate::types::{OrgId, RoleName};

/// Returns the role names `user` holds in `org`. Empty when unrelated.
pub fn roles_of(user: &User, org: OrgId) -> BTreeSet<RoleName> {
	user
		.organisation_roles
		.iter()
		.filter(|grant| grant.organisation == org)
		.map(|grant| grant.name)
		.collect()
}

/// Returns true if any role `user` holds in `org` satisfies `required`.
pub fn holds_at_least(user: &User, org: OrgId, required: RoleName) -> bool {
	roles_of(user, org)
		.iter()
		.any(|role| role.satisfies(required))
}
