// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolution of the user an actor acts as.

use crate::abac::Actor;
use crate::directory::Directory;
use crate::entity::User;
use crate::types::UserId;

/// Result of resolving an actor to the user whose standing applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delegation<'a> {
	/// The actor acts as this user.
	Acting(&'a User),
	/// A non-delegate token; it carries no ownership or role authority.
	NoAuthority,
	/// A delegate token whose owner is not in the directory.
	OwnerMissing(UserId),
}

/// Resolves `actor` to the user whose standing governs ownership decisions.
///
/// A user acts as itself. A delegate token acts as its owner. A non-delegate
/// token never stands in for its owner.
pub fn effective_actor<'a>(directory: &'a Directory, actor: Actor<'a>) -> Delegation<'a> {
	match actor {
		Actor::User(user) => Delegation::Acting(user),
		Actor::Token(token) if token.is_delegate => match directory.user(token.owner) {
			Some(owner) => Delegation::Acting(owner),
			None => Delegation::OwnerMissing(token.owner),
		},
		Actor::Token(_) => Delegation::NoAuthority,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entity::UserToken;
	use crate::types::TokenSecret;

	fn directory_with(user: &User) -> Directory {
		Directory::builder().user(user.clone()).build().unwrap()
	}

	#[test]
	fn user_acts_as_itself() {
		let user = User::new("Dave");
		let directory = Directory::default();

		assert_eq!(
			effective_actor(&directory, Actor::User(&user)),
			Delegation::Acting(&user)
		);
	}

	#[test]
	fn delegate_token_acts_as_owner() {
		let user = User::new("Dave");
		let directory = directory_with(&user);
		let token = UserToken::new(user.id, TokenSecret::new("t")).delegate(true);

		match effective_actor(&directory, Actor::Token(&token)) {
			Delegation::Acting(resolved) => assert_eq!(resolved.id, user.id),
			other => panic!("expected delegation to owner, got {other:?}"),
		}
	}

	#[test]
	fn non_delegate_token_has_no_authority() {
		let user = User::new("Dave");
		let directory = directory_with(&user);
		let token = UserToken::new(user.id, TokenSecret::new("t"));

		assert_eq!(
			effective_actor(&directory, Actor::Token(&token)),
			Delegation::NoAuthority
		);
	}

	#[test]
	fn delegate_with_missing_owner_is_reported() {
		let orphan_owner = UserId::generate();
		let token = UserToken::new(orphan_owner, TokenSecret::new("t")).delegate(true);

		assert_eq!(
			effective_actor(&Directory::default(), Actor::Token(&token)),
			Delegation::OwnerMissing(orphan_owner)
		);
	}
}
