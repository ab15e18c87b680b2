//! Policy assignment identity and state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use dataprotect_provider::{EntityType, PolicyAssignment};

/// Composite id of a policy assignment, rendered as `"{policy_id}/{entity_id}"`.
///
/// The policy id may not contain `/`; everything after the first `/` is the
/// entity id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssignmentId {
    pub policy_id: String,
    pub entity_id: String,
}

impl AssignmentId {
    pub fn new(policy_id: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            entity_id: entity_id.into(),
        }
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.policy_id, self.entity_id)
    }
}

impl FromStr for AssignmentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |detail: &str| CoreError::InvalidImportId {
            id: s.to_string(),
            detail: detail.to_string(),
        };

        let (policy_id, entity_id) = s
            .split_once('/')
            .ok_or_else(|| invalid("expected '<policy_id>/<entity_id>'"))?;

        if policy_id.trim().is_empty() {
            return Err(invalid("policy id is empty"));
        }
        if entity_id.trim().is_empty() {
            return Err(invalid("entity id is empty"));
        }

        Ok(Self::new(policy_id, entity_id))
    }
}

/// Stored state of a policy assignment resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyAssignmentState {
    /// `"{policy_id}/{entity_id}"`
    pub id: String,
    pub policy_id: String,
    pub entity_id: String,
    pub entity_type: EntityType,
}

impl PolicyAssignmentState {
    pub fn assignment_id(&self) -> AssignmentId {
        AssignmentId::new(&self.policy_id, &self.entity_id)
    }
}

impl From<PolicyAssignment> for PolicyAssignmentState {
    fn from(a: PolicyAssignment) -> Self {
        Self {
            id: AssignmentId::new(&a.policy_id, &a.entity_id).to_string(),
            policy_id: a.policy_id,
            entity_id: a.entity_id,
            entity_type: a.entity_type,
        }
    }
}
