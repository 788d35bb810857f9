// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Route scope checks for tokens.

use crate::entity::{Request, UserToken};
use crate::types::Scope;

/// Returns true if `token` was granted every scope `request` requires.
///
/// A request with no scopes is always satisfied.
pub fn satisfies(token: &UserToken, request: &Request) -> bool {
	request.scopes.iter().all(|required| token.has_scope(required))
}

/// Returns the scopes `request` requires that `token` lacks, in sorted order.
pub fn missing_scopes<'r>(token: &UserToken, request: &'r Request) -> Vec<&'r Scope> {
	request
		.scopes
		.iter()
		.filter(|required| !token.has_scope(required))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{TokenSecret, UserId};
	use proptest::prelude::*;
	use std::collections::BTreeSet;

	fn scope(label: &str) -> Scope {
		Scope::new(label).unwrap()
	}

	fn token_with(scopes: &[&str]) -> UserToken {
		UserToken::new(UserId::generate(), TokenSecret::new("t"))
			.with_scopes(scopes.iter().map(|s| scope(s)))
	}

	#[test]
	fn empty_request_is_always_satisfied() {
		assert!(satisfies(&token_with(&[]), &Request::unscoped()));
		assert!(satisfies(&token_with(&["read.project"]), &Request::unscoped()));
	}

	#[test]
	fn granted_scope_satisfies() {
		let request = Request::new([scope("read.project")]);
		assert!(satisfies(&token_with(&["read.project"]), &request));
	}

	#[test]
	fn absent_scope_fails_and_is_reported() {
		let request = Request::new([scope("read.project"), scope("display.project")]);
		let token = token_with(&["read.project"]);

		assert!(!satisfies(&token, &request));
		assert_eq!(missing_scopes(&token, &request), vec![&scope("display.project")]);
	}

	#[test]
	fn missing_scopes_borrow_only_the_request() {
		let request = Request::new([scope("read.project"), scope("display.project")]);
		let missing = {
			let token = token_with(&["display.project"]);
			missing_scopes(&token, &request)
		};
		assert_eq!(missing, vec![&scope("read.project")]);
	}

	fn arb_scope_set() -> impl Strategy<Value = BTreeSet<String>> {
		prop::collection::btree_set("[a-z]{1,6}\\.[a-z]{1,6}", 0..5)
	}

	proptest! {
		#[test]
		fn satisfies_iff_nothing_missing(granted in arb_scope_set(), required in arb_scope_set()) {
			let token = token_with(&granted.iter().map(String::as_str).collect::<Vec<_>>());
			let request = Request::new(required.iter().map(|s| scope(s)));

			prop_assert_eq!(satisfies(&token, &request), missing_scopes(&token, &request).is_empty());
			prop_assert_eq!(satisfies(&token, &request), required.is_subset(&granted));
		}
	}
}
