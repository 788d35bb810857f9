// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project authorization for Warrant.
//!
//! Decides whether an actor (a [`User`] or a [`UserToken`]) may act on a
//! [`Project`], and whether a token may invoke a scoped route.
//!
//! # Model
//!
//! - Personal projects belong to exactly one user, who alone has standing.
//! - Organisation projects are readable by any owner or member of the
//!   organisation and mutable only by its owners.
//! - Delegate tokens act with their owner's standing; other tokens only pass
//!   route scope checks.
//!
//! # Usage
//!
//! ```
//! use warrant_authz::{Action, Actor, Directory, Engine, Organisation, Project, Resource, RoleName, User};
//!
//! let org = Organisation::new("Unlimited Ltd.");
//! let dave = User::new("Dave").with_role(org.id, RoleName::Owner);
//! let project = Project::organisational("Organisation project", org.id);
//!
//! let directory = Directory::builder()
//!     .organisation(org)
//!     .user(dave.clone())
//!     .project(project.clone())
//!     .build()
//!     .unwrap();
//!
//! let engine = Engine::default();
//! assert!(engine.check(&directory, Actor::User(&dave), Action::Delete, Resource::Project(&project)));
//! ```

pub mod abac;
pub mod directory;
pub mod entity;
pub mod error;
pub mod types;

pub use abac::{
	Action, Actor, Decision, Delegation, DenyReason, Engine, EngineConfig, Resource,
};
pub use directory::{Directory, DirectoryBuilder};
pub use entity::{
	Organisation, OrganisationRole, Owner, Project, Request, UnknownRolePolicy, User, UserToken,
};
pub use error::{AuthzError, DirectoryError};
pub use types::{OrgId, ProjectId, RoleName, Scope, TokenId, TokenSecret, UserId, REDACTED};
