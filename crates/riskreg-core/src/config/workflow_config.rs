use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Role;

/// Approval workflow configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Roles whose change requests are auto-approved and who may review others'.
    pub privileged_roles: Vec<Role>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            privileged_roles: defaults::DEFAULT_PRIVILEGED_ROLES.to_vec(),
        }
    }
}

impl WorkflowConfig {
    pub fn is_privileged(&self, role: Role) -> bool {
        self.privileged_roles.contains(&role)
    }
}
