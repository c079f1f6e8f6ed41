use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Capability;

/// The user performing a mutation, with the capability resolved for the project at hand.
///
/// Produced by a role provider in `atelier-store`; the engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub capability: Capability,
}

impl Actor {
    #[must_use]
    pub fn new(user_id: impl Into<String>, capability: Capability) -> Self {
        Self {
            user_id: user_id.into(),
            capability,
        }
    }

    #[must_use]
    pub fn oversight(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Capability::Oversight)
    }

    #[must_use]
    pub fn client(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Capability::Client)
    }
}
