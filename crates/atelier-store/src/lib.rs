//! # atelier-store
//!
//! Persistence and orchestration around `atelier-engine`.
//!
//! The engine is pure; this crate supplies the collaborators it expects:
//! a [`TaskStore`] holding task documents per project, a [`RoleProvider`]
//! resolving each user's approval capability, and [`ProjectService`], which
//! wraps every mutation in "load latest snapshot, run engine, save result".

pub mod error;
pub mod journal;
pub mod roles;
pub mod service;
pub mod store;

pub use error::{ServiceError, StoreError};
pub use journal::JsonlTaskStore;
pub use roles::{RoleProvider, StaticRoles};
pub use service::{LockState, ProjectService};
pub use store::{MemoryTaskStore, TaskStore};
