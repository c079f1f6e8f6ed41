//! # atelier-engine
//!
//! Task lifecycle engine for interior-design project boards.
//!
//! Every operation is a synchronous computation over a caller-supplied
//! snapshot: the engine receives tasks, returns new task values or a typed
//! [`EngineError`] rejection, and never performs I/O.
//!
//! - [`dependency`] resolves prerequisites and reports blocking tasks.
//! - [`approval`] applies two-party (client / oversight) votes.
//! - [`deriver`] computes status from checklist and approval state.
//! - [`freeze`] handles the administrative on-hold / aborted override.
//! - [`gantt`] lays tasks out on a shared timeline and flags date conflicts.
//! - [`overdue`] selects tasks for the external overdue sweep.
//! - [`cycles`] reports dependency cycles without rejecting them.
//! - [`engine`] ties these together behind [`TaskEngine::apply`].

pub mod approval;
pub mod cycles;
pub mod dependency;
pub mod deriver;
pub mod engine;
pub mod error;
pub mod freeze;
pub mod gantt;
pub mod overdue;

#[cfg(test)]
mod test_support;

pub use engine::{Mutation, MutationContext, TaskEngine};
pub use error::{BlockingTask, EngineError};
