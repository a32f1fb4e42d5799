//! Read-only projections supplied by directory collaborators.
//!
//! The decision engine never loads users or control points itself; it is
//! handed these snapshots, evaluates them, and forgets them. Nothing here
//! is persisted by the core.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{ControlPointId, RoleId, TenantId, UserId};

/// Read-only projection of a user at decision time.
///
/// `roles` maps each assigned role to its display name. The map doubles as
/// the role-id set for authorization checks and as the name source for
/// audit text; iteration is in role-id order, which keeps the text
/// deterministic for identical inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySnapshot {
    /// The user this snapshot projects.
    pub user_id: UserId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Name shown in decisions and audit events.
    pub display_name: String,
    /// Whether the presented credential is currently active.
    pub has_active_credential: bool,
    /// Assigned roles, role id to role display name.
    pub roles: BTreeMap<RoleId, String>,
}

impl IdentitySnapshot {
    /// Creates a snapshot with an active credential and no roles.
    pub fn new(user_id: UserId, tenant_id: TenantId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            tenant_id,
            display_name: display_name.into(),
            has_active_credential: true,
            roles: BTreeMap::new(),
        }
    }

    /// Adds a role assignment (builder pattern).
    pub fn with_role(mut self, role_id: RoleId, name: impl Into<String>) -> Self {
        self.roles.insert(role_id, name.into());
        self
    }

    /// Marks the credential inactive (builder pattern).
    pub fn with_inactive_credential(mut self) -> Self {
        self.has_active_credential = false;
        self
    }

    /// The set of assigned role ids.
    pub fn role_ids(&self) -> BTreeSet<RoleId> {
        self.roles.keys().copied().collect()
    }

    /// Display names for the given roles, in role-id order.
    ///
    /// Roles absent from this snapshot are skipped; the caller only asks
    /// about roles it found in the intersection with a rule.
    pub fn role_names(&self, ids: &BTreeSet<RoleId>) -> Vec<&str> {
        self.roles
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(_, name)| name.as_str())
            .collect()
    }
}

/// Read-only projection of a control point at decision time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPointSnapshot {
    /// The control point this snapshot projects.
    pub control_point_id: ControlPointId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Name shown in decisions and audit events.
    pub display_name: String,
    /// Display name of the space the control point belongs to.
    pub space_display_name: String,
}

impl ControlPointSnapshot {
    pub fn new(
        control_point_id: ControlPointId,
        tenant_id: TenantId,
        display_name: impl Into<String>,
        space_display_name: impl Into<String>,
    ) -> Self {
        Self {
            control_point_id,
            tenant_id,
            display_name: display_name.into(),
            space_display_name: space_display_name.into(),
        }
    }
}
