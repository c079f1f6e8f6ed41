//! Identity/role lookup.

use std::collections::HashMap;

use atelier_core::enums::Capability;
use atelier_core::identity::Actor;

/// Resolves which approval capability a user holds on a project.
pub trait RoleProvider: Send + Sync {
    /// `Capability::None` for users without a grant.
    fn capability(&self, project_id: &str, user_id: &str) -> Capability;

    fn actor(&self, project_id: &str, user_id: &str) -> Actor {
        Actor::new(user_id, self.capability(project_id, user_id))
    }
}

/// Fixed grants per `(project, user)`.
#[derive(Debug, Clone, Default)]
pub struct StaticRoles {
    grants: HashMap<(String, String), Capability>,
}

impl StaticRoles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn grant(
        mut self,
        project_id: impl Into<String>,
        user_id: impl Into<String>,
        capability: Capability,
    ) -> Self {
        self.grants
            .insert((project_id.into(), user_id.into()), capability);
        self
    }
}

impl RoleProvider for StaticRoles {
    fn capability(&self, project_id: &str, user_id: &str) -> Capability {
        self.grants
            .get(&(project_id.to_string(), user_id.to_string()))
            .copied()
            .unwrap_or_default()
    }
}
